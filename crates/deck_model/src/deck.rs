//! Deck root: ordered pages plus canvas metadata

use crate::{Page, PageId, Rect};
use serde::{Deserialize, Serialize};

/// Sentinel index meaning "append at the end" for page insertion
pub const APPEND: isize = -1;

/// Deck metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// The root document: an ordered list of pages on a fixed-size canvas.
///
/// Page indices coming from the UI can be stale; insert/remove validate
/// them and report rejection through their return value instead of
/// panicking or erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pages: Vec<Page>,
    pub metadata: DeckMetadata,
    /// The drawable canvas area shared by every page
    pub canvas: Rect,
}

impl Deck {
    /// Create a deck with a single empty page and the default 800x600
    /// canvas
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new("Slide 1")],
            metadata: DeckMetadata::default(),
            canvas: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }

    /// Create a deck with no pages (mostly for tests and importers)
    pub fn empty() -> Self {
        Self {
            pages: Vec::new(),
            metadata: DeckMetadata::default(),
            canvas: Rect::new(0.0, 0.0, 800.0, 600.0),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn page_by_id(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn page_by_id_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id() == id)
    }

    pub fn position_of(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    /// Insert a page at `index`, where [`APPEND`] (or any negative value)
    /// appends. Returns false without touching the deck when the index is
    /// out of range.
    pub fn insert_page(&mut self, index: isize, page: Page) -> bool {
        if index < 0 {
            self.pages.push(page);
            return true;
        }
        let index = index as usize;
        if index > self.pages.len() {
            return false;
        }
        self.pages.insert(index, page);
        true
    }

    /// Remove the page at `index`. Returns None without touching the deck
    /// when the index is out of range.
    pub fn remove_page(&mut self, index: usize) -> Option<Page> {
        if index >= self.pages.len() {
            return None;
        }
        Some(self.pages.remove(index))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_page_append_sentinel() {
        let mut deck = Deck::new();
        assert!(deck.insert_page(APPEND, Page::new("Slide 2")));
        assert_eq!(deck.page_count(), 2);
        assert_eq!(deck.page(1).map(|p| p.name.as_str()), Some("Slide 2"));
    }

    #[test]
    fn test_insert_page_out_of_range_is_rejected() {
        let mut deck = Deck::new();
        assert!(!deck.insert_page(5, Page::new("nope")));
        assert_eq!(deck.page_count(), 1);
    }

    #[test]
    fn test_remove_page_out_of_range_is_rejected() {
        let mut deck = Deck::new();
        assert!(deck.remove_page(3).is_none());
        assert_eq!(deck.page_count(), 1);
    }

    #[test]
    fn test_insert_at_front() {
        let mut deck = Deck::new();
        assert!(deck.insert_page(0, Page::new("cover")));
        assert_eq!(deck.page(0).map(|p| p.name.as_str()), Some("cover"));
        assert_eq!(deck.page(1).map(|p| p.name.as_str()), Some("Slide 1"));
    }
}

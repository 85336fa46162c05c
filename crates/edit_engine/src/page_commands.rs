//! Commands mutating the page list

use crate::{Command, Result};
use deck_model::{Deck, DeckModelError, Page, PageId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Insert a page at a recorded index (`-1` sentinel = append).
///
/// An out-of-range index is a silent no-op: the UI can hold stale
/// indices, and rejecting quietly is more robust than failing the whole
/// command pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPage {
    pub index: isize,
    pub page: Page,
}

impl AddPage {
    pub fn new(index: isize, page: Page) -> Self {
        Self { index, page }
    }

    pub fn append(page: Page) -> Self {
        Self {
            index: deck_model::APPEND,
            page,
        }
    }
}

impl Command for AddPage {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        if !deck.insert_page(self.index, self.page.clone()) {
            warn!(index = self.index as i64, "page insert index out of range, ignoring");
        }
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        match deck.position_of(self.page.id()) {
            Some(index) => {
                deck.remove_page(index);
            }
            None => warn!(page = %self.page.id(), "page already gone, ignoring"),
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Add Page"
    }
}

/// Remove a page, remembering its index so undo re-inserts it at the
/// original position rather than appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePage {
    pub index: usize,
    pub page: Page,
}

impl RemovePage {
    /// Capture the page at `index`; None when the index is out of range
    pub fn capture(deck: &Deck, index: usize) -> Option<Self> {
        deck.page(index).map(|page| Self {
            index,
            page: page.clone(),
        })
    }
}

impl Command for RemovePage {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        // Locate by id rather than trusting the recorded index, in case
        // pages shifted since capture.
        match deck.position_of(self.page.id()) {
            Some(index) => {
                deck.remove_page(index);
            }
            None => warn!(page = %self.page.id(), "page already gone, ignoring"),
        }
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        // Original index, clamped so the page is never lost when the
        // deck shrank in the meantime.
        let index = self.index.min(deck.page_count());
        deck.insert_page(index as isize, self.page.clone());
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Remove Page"
    }
}

/// Set a page's name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePage {
    pub page: PageId,
    pub old: String,
    pub new: String,
}

impl RenamePage {
    pub fn new(page: PageId, old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            page,
            old: old.into(),
            new: new.into(),
        }
    }
}

impl Command for RenamePage {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        let page = deck
            .page_by_id_mut(self.page)
            .ok_or(DeckModelError::PageNotFound(self.page))?;
        page.name = self.new.clone();
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        let page = deck
            .page_by_id_mut(self.page)
            .ok_or(DeckModelError::PageNotFound(self.page))?;
        page.name = self.old.clone();
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Rename Page"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_page_append_and_undo() {
        let mut deck = Deck::new();
        let cmd = AddPage::append(Page::new("Slide 2"));

        cmd.apply(&mut deck).unwrap();
        assert_eq!(deck.page_count(), 2);

        cmd.unapply(&mut deck).unwrap();
        assert_eq!(deck.page_count(), 1);
    }

    #[test]
    fn test_add_page_out_of_range_is_silent_noop() {
        let mut deck = Deck::new();
        let cmd = AddPage::new(9, Page::new("stale"));
        cmd.apply(&mut deck).unwrap();
        assert_eq!(deck.page_count(), 1);
    }

    #[test]
    fn test_remove_page_undo_restores_original_index() {
        let mut deck = Deck::new();
        deck.insert_page(deck_model::APPEND, Page::new("Slide 2"));
        deck.insert_page(deck_model::APPEND, Page::new("Slide 3"));

        let cmd = RemovePage::capture(&deck, 1).unwrap();
        cmd.apply(&mut deck).unwrap();
        assert_eq!(deck.page(1).map(|p| p.name.as_str()), Some("Slide 3"));

        cmd.unapply(&mut deck).unwrap();
        let names: Vec<&str> = deck.pages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Slide 1", "Slide 2", "Slide 3"]);
    }

    #[test]
    fn test_remove_page_capture_out_of_range() {
        let deck = Deck::new();
        assert!(RemovePage::capture(&deck, 4).is_none());
    }

    #[test]
    fn test_rename_page_roundtrip() {
        let mut deck = Deck::new();
        let page_id = deck.pages()[0].id();
        let cmd = RenamePage::new(page_id, "Slide 1", "Intro");

        cmd.apply(&mut deck).unwrap();
        assert_eq!(deck.page(0).unwrap().name, "Intro");

        cmd.unapply(&mut deck).unwrap();
        assert_eq!(deck.page(0).unwrap().name, "Slide 1");
    }
}

//! A page owning an ordered element list and its selection set

use crate::{DeckModelError, Element, ElementId, PageId, Point, Rect, Result};
use serde::{Deserialize, Serialize};

/// A page (slide) in a deck.
///
/// Owns its elements exclusively; list order is paint order, and z-order
/// ranks are re-derived from list order after every structural change so
/// they stay contiguous `1..N`. The selection set lives on the page and
/// can therefore never span two pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    id: PageId,
    pub name: String,
    elements: Vec<Element>,
    selection: Vec<ElementId>,
}

impl Page {
    /// Create a new empty page
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            name: name.into(),
            elements: Vec::new(),
            selection: Vec::new(),
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    /// Elements in paint order (bottom first)
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Position of an element in the list, if present
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Like [`Page::element`] but with an error for command plumbing
    pub fn require(&self, id: ElementId) -> Result<&Element> {
        self.element(id).ok_or(DeckModelError::ElementNotFound(id))
    }

    /// Like [`Page::element_mut`] but with an error for command plumbing
    pub fn require_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.element_mut(id)
            .ok_or(DeckModelError::ElementNotFound(id))
    }

    /// Append an element at the top of the z-order
    pub fn push_element(&mut self, element: Element) {
        self.elements.push(element);
        self.sync_z_order();
    }

    /// Insert an element at a list position (clamped to the list length)
    pub fn insert_element(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        self.sync_z_order();
    }

    /// Remove an element by id, dropping it from the selection as well
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        let element = self.elements.remove(index);
        self.selection.retain(|&s| s != id);
        self.sync_z_order();
        Some(element)
    }

    /// Re-derive contiguous `1..N` z-order ranks from list order
    pub fn sync_z_order(&mut self) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            element.z_order = index as u32 + 1;
        }
    }

    /// Topmost visible element containing the point, by z-order
    pub fn topmost_hit(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.visible && e.bounds.contains(point))
            .map(|e| e.id())
    }

    /// Ids of every visible element whose bounds intersect the rectangle
    pub fn elements_in_rect(&self, rect: &Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.visible && e.bounds.intersects(rect))
            .map(|e| e.id())
            .collect()
    }

    // --- Selection ---

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection with a single element
    pub fn select_only(&mut self, id: ElementId) {
        self.selection.clear();
        if self.element(id).is_some() {
            self.selection.push(id);
        }
    }

    /// Replace the selection wholesale, dropping ids not on this page
    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.selection = ids
            .into_iter()
            .filter(|&id| self.element(id).is_some())
            .collect();
    }

    /// Toggle membership; returns true when the element is now selected
    pub fn toggle_selected(&mut self, id: ElementId) -> bool {
        if let Some(index) = self.selection.iter().position(|&s| s == id) {
            self.selection.remove(index);
            false
        } else if self.element(id).is_some() {
            self.selection.push(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Bounding box of the current selection, if non-empty
    pub fn selection_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for &id in &self.selection {
            if let Some(element) = self.element(id) {
                bounds = Some(match bounds {
                    Some(b) => b.union(&element.bounds),
                    None => element.bounds,
                });
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeKind;

    fn shape_at(x: f64, y: f64) -> Element {
        Element::shape(ShapeKind::Rectangle, Rect::new(x, y, 50.0, 50.0))
    }

    #[test]
    fn test_z_order_contiguous_after_removal() {
        let mut page = Page::new("p");
        let a = shape_at(0.0, 0.0);
        let b = shape_at(10.0, 0.0);
        let c = shape_at(20.0, 0.0);
        let b_id = b.id();
        page.push_element(a);
        page.push_element(b);
        page.push_element(c);

        page.remove_element(b_id);
        let ranks: Vec<u32> = page.elements().iter().map(|e| e.z_order).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_topmost_hit_prefers_later_element() {
        let mut page = Page::new("p");
        let under = shape_at(0.0, 0.0);
        let over = shape_at(25.0, 25.0);
        let over_id = over.id();
        page.push_element(under);
        page.push_element(over);

        // Point inside both; the later (higher z) element wins.
        assert_eq!(page.topmost_hit(Point::new(30.0, 30.0)), Some(over_id));
    }

    #[test]
    fn test_topmost_hit_skips_invisible() {
        let mut page = Page::new("p");
        let under = shape_at(0.0, 0.0);
        let mut over = shape_at(0.0, 0.0);
        over.visible = false;
        let under_id = under.id();
        page.push_element(under);
        page.push_element(over);

        assert_eq!(page.topmost_hit(Point::new(10.0, 10.0)), Some(under_id));
    }

    #[test]
    fn test_remove_element_drops_selection() {
        let mut page = Page::new("p");
        let a = shape_at(0.0, 0.0);
        let a_id = a.id();
        page.push_element(a);
        page.select_only(a_id);
        assert!(page.is_selected(a_id));

        page.remove_element(a_id);
        assert!(page.selection().is_empty());
    }

    #[test]
    fn test_toggle_selected() {
        let mut page = Page::new("p");
        let a = shape_at(0.0, 0.0);
        let a_id = a.id();
        page.push_element(a);

        assert!(page.toggle_selected(a_id));
        assert!(!page.toggle_selected(a_id));
        assert!(page.selection().is_empty());
    }

    #[test]
    fn test_selection_bounds_union() {
        let mut page = Page::new("p");
        let a = shape_at(0.0, 0.0);
        let b = shape_at(100.0, 100.0);
        let (a_id, b_id) = (a.id(), b.id());
        page.push_element(a);
        page.push_element(b);
        page.set_selection(vec![a_id, b_id]);

        assert_eq!(
            page.selection_bounds(),
            Some(Rect::new(0.0, 0.0, 150.0, 150.0))
        );
    }
}

//! Commands mutating elements on a page

use crate::{Command, EditError, Result};
use deck_model::{Deck, DeckModelError, Element, ElementId, Page, PageId, Point, Rect};
use serde::{Deserialize, Serialize};

fn page_mut(deck: &mut Deck, id: PageId) -> Result<&mut Page> {
    deck.page_by_id_mut(id)
        .ok_or_else(|| DeckModelError::PageNotFound(id).into())
}

/// Bounds and rotation taken or restored as one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub bounds: Rect,
    pub rotation: f64,
}

impl Placement {
    pub fn new(bounds: Rect, rotation: f64) -> Self {
        Self { bounds, rotation }
    }

    pub fn of(element: &Element) -> Self {
        Self {
            bounds: element.bounds,
            rotation: element.rotation,
        }
    }
}

/// Append elements to a page, assigning them trailing z-order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddElements {
    pub page: PageId,
    pub elements: Vec<Element>,
}

impl AddElements {
    pub fn new(page: PageId, elements: Vec<Element>) -> Self {
        Self { page, elements }
    }

    pub fn single(page: PageId, element: Element) -> Self {
        Self {
            page,
            elements: vec![element],
        }
    }
}

impl Command for AddElements {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        for element in &self.elements {
            page.push_element(element.clone());
        }
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        for element in self.elements.iter().rev() {
            page.remove_element(element.id())
                .ok_or(DeckModelError::ElementNotFound(element.id()))?;
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Add Elements"
    }
}

/// Remove a captured list of elements from a page.
///
/// Undo re-appends the captured elements (same ids, so identity is
/// preserved). Re-appending does not restore the original relative
/// z-position when other structural edits happened between capture and
/// undo; that ordering limitation is deliberate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteElements {
    pub page: PageId,
    pub elements: Vec<Element>,
}

impl DeleteElements {
    /// Capture the named elements from the page, in list order
    pub fn capture(page: &Page, ids: &[ElementId]) -> Self {
        let elements = page
            .elements()
            .iter()
            .filter(|e| ids.contains(&e.id()))
            .cloned()
            .collect();
        Self {
            page: page.id(),
            elements,
        }
    }
}

impl Command for DeleteElements {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        for element in &self.elements {
            page.remove_element(element.id())
                .ok_or(DeckModelError::ElementNotFound(element.id()))?;
        }
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        for element in &self.elements {
            page.push_element(element.clone());
        }
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Delete Elements"
    }
}

/// Set an element's absolute position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveElement {
    pub page: PageId,
    pub element: ElementId,
    pub before: Point,
    pub after: Point,
}

impl MoveElement {
    pub fn new(page: PageId, element: ElementId, before: Point, after: Point) -> Self {
        Self {
            page,
            element,
            before,
            after,
        }
    }
}

impl Command for MoveElement {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        page.require_mut(self.element)?.set_position(self.after);
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        page.require_mut(self.element)?.set_position(self.before);
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Move Element"
    }
}

/// Set an element's bounds and rotation atomically.
///
/// Both fields travel together in a [`Placement`] so undo can never leave
/// a mixed state (new bounds with old rotation, or vice versa).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleElement {
    pub page: PageId,
    pub element: ElementId,
    pub before: Placement,
    pub after: Placement,
}

impl ScaleElement {
    pub fn new(page: PageId, element: ElementId, before: Placement, after: Placement) -> Self {
        Self {
            page,
            element,
            before,
            after,
        }
    }
}

impl Command for ScaleElement {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        let element = page.require_mut(self.element)?;
        element.bounds = self.after.bounds;
        element.rotation = self.after.rotation;
        Ok(())
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        let element = page.require_mut(self.element)?;
        element.bounds = self.before.bounds;
        element.rotation = self.before.rotation;
        Ok(())
    }

    fn display_name(&self) -> &str {
        "Resize Element"
    }
}

/// Replace the text of a text-bearing element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditText {
    pub page: PageId,
    pub element: ElementId,
    pub old: String,
    pub new: String,
}

impl EditText {
    pub fn new(
        page: PageId,
        element: ElementId,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            page,
            element,
            old: old.into(),
            new: new.into(),
        }
    }

    fn set_text(&self, deck: &mut Deck, text: &str) -> Result<()> {
        let page = page_mut(deck, self.page)?;
        let element = page.require_mut(self.element)?;
        if !element.set_text_content(text) {
            return Err(EditError::InvalidCommand(format!(
                "Element {} is not text-bearing",
                self.element
            )));
        }
        Ok(())
    }
}

impl Command for EditText {
    fn apply(&self, deck: &mut Deck) -> Result<()> {
        self.set_text(deck, &self.new)
    }

    fn unapply(&self, deck: &mut Deck) -> Result<()> {
        self.set_text(deck, &self.old)
    }

    fn display_name(&self) -> &str {
        "Edit Text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::ShapeKind;

    fn deck_with_elements(n: usize) -> (Deck, PageId, Vec<ElementId>) {
        let mut deck = Deck::new();
        let page_id = deck.pages()[0].id();
        let mut ids = Vec::new();
        for i in 0..n {
            let element = Element::shape(
                ShapeKind::Rectangle,
                Rect::new(i as f64 * 60.0, 0.0, 50.0, 50.0),
            );
            ids.push(element.id());
            deck.page_mut(0).unwrap().push_element(element);
        }
        (deck, page_id, ids)
    }

    #[test]
    fn test_add_elements_assigns_trailing_z_order() {
        let (mut deck, page_id, _) = deck_with_elements(2);
        let element = Element::shape(ShapeKind::Oval, Rect::new(0.0, 0.0, 20.0, 20.0));
        let id = element.id();

        AddElements::single(page_id, element)
            .apply(&mut deck)
            .unwrap();

        let page = deck.page(0).unwrap();
        assert_eq!(page.element(id).unwrap().z_order, 3);
    }

    #[test]
    fn test_add_elements_undo_removes_by_identity() {
        let (mut deck, page_id, _) = deck_with_elements(1);
        let element = Element::shape(ShapeKind::Oval, Rect::new(0.0, 0.0, 20.0, 20.0));
        let id = element.id();
        let cmd = AddElements::single(page_id, element);

        cmd.apply(&mut deck).unwrap();
        cmd.unapply(&mut deck).unwrap();
        assert!(deck.page(0).unwrap().element(id).is_none());
        assert_eq!(deck.page(0).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_undo_reappends_at_top() {
        // Deleting the bottom element of [a, b] and undoing leaves
        // [b, a]: the re-append does not restore the original slot.
        let (mut deck, _, ids) = deck_with_elements(2);
        let cmd = DeleteElements::capture(deck.page(0).unwrap(), &ids[0..1]);

        cmd.apply(&mut deck).unwrap();
        assert_eq!(deck.page(0).unwrap().len(), 1);

        cmd.unapply(&mut deck).unwrap();
        let order: Vec<ElementId> = deck
            .page(0)
            .unwrap()
            .elements()
            .iter()
            .map(|e| e.id())
            .collect();
        assert_eq!(order, vec![ids[1], ids[0]]);
        // Ranks stay contiguous regardless.
        let ranks: Vec<u32> = deck
            .page(0)
            .unwrap()
            .elements()
            .iter()
            .map(|e| e.z_order)
            .collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_delete_undo_preserves_identity() {
        let (mut deck, _, ids) = deck_with_elements(1);
        let cmd = DeleteElements::capture(deck.page(0).unwrap(), &ids);

        cmd.apply(&mut deck).unwrap();
        cmd.unapply(&mut deck).unwrap();
        assert!(deck.page(0).unwrap().element(ids[0]).is_some());
    }

    #[test]
    fn test_move_is_replay_safe() {
        let (mut deck, page_id, ids) = deck_with_elements(1);
        let cmd = MoveElement::new(page_id, ids[0], Point::new(0.0, 0.0), Point::new(30.0, 40.0));

        cmd.apply(&mut deck).unwrap();
        cmd.apply(&mut deck).unwrap();
        assert_eq!(
            deck.page(0).unwrap().element(ids[0]).unwrap().position(),
            Point::new(30.0, 40.0)
        );

        cmd.unapply(&mut deck).unwrap();
        cmd.unapply(&mut deck).unwrap();
        assert_eq!(
            deck.page(0).unwrap().element(ids[0]).unwrap().position(),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_scale_restores_bounds_and_rotation_together() {
        let mut deck = Deck::new();
        let page_id = deck.pages()[0].id();
        let element = Element::shape(ShapeKind::Rectangle, Rect::new(10.0, 10.0, 50.0, 50.0));
        let id = element.id();
        deck.page_mut(0).unwrap().push_element(element);

        let cmd = ScaleElement::new(
            page_id,
            id,
            Placement::new(Rect::new(10.0, 10.0, 50.0, 50.0), 0.0),
            Placement::new(Rect::new(10.0, 10.0, 100.0, 60.0), 45.0),
        );

        cmd.apply(&mut deck).unwrap();
        {
            let element = deck.page(0).unwrap().element(id).unwrap();
            assert_eq!(element.bounds, Rect::new(10.0, 10.0, 100.0, 60.0));
            assert_eq!(element.rotation, 45.0);
        }

        cmd.unapply(&mut deck).unwrap();
        let element = deck.page(0).unwrap().element(id).unwrap();
        assert_eq!(element.bounds, Rect::new(10.0, 10.0, 50.0, 50.0));
        assert_eq!(element.rotation, 0.0);
    }

    #[test]
    fn test_edit_text() {
        let mut deck = Deck::new();
        let page_id = deck.pages()[0].id();
        let element = Element::text("draft", Rect::new(0.0, 0.0, 100.0, 40.0));
        let id = element.id();
        deck.page_mut(0).unwrap().push_element(element);

        let cmd = EditText::new(page_id, id, "draft", "final");
        cmd.apply(&mut deck).unwrap();
        assert_eq!(
            deck.page(0).unwrap().element(id).unwrap().text_content(),
            Some("final")
        );

        cmd.unapply(&mut deck).unwrap();
        assert_eq!(
            deck.page(0).unwrap().element(id).unwrap().text_content(),
            Some("draft")
        );
    }

    #[test]
    fn test_edit_text_on_shape_errors() {
        let (mut deck, page_id, ids) = deck_with_elements(1);
        let cmd = EditText::new(page_id, ids[0], "", "x");
        assert!(matches!(
            cmd.apply(&mut deck),
            Err(EditError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_move_missing_element_errors() {
        let (mut deck, page_id, _) = deck_with_elements(0);
        let cmd = MoveElement::new(
            page_id,
            ElementId::new(),
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
        );
        assert!(cmd.apply(&mut deck).is_err());
    }
}

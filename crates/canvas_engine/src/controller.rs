//! Direct-manipulation state machine for one deck
//!
//! [`CanvasController`] owns the deck, its [`History`], and the current
//! pointer gesture. Pointer press/move/release are discrete calls from
//! the host event loop; while a gesture is live the model is mutated
//! directly for frame feedback, and a single command is pushed to the
//! history on release so undo works on whole gestures, not ticks.

use std::mem;

use deck_model::{Deck, Element, ElementId, Page, Point, Rect};
use edit_engine::{
    AddElements, AddPage, Command, DeleteElements, EditText, History, MoveElement, Placement,
    RemovePage, RenamePage, ScaleElement,
};
use tracing::{debug, warn};

use crate::alignment::{resolve_snap, GuideLine, SNAP_TOLERANCE};
use crate::error::{CanvasError, Result};
use crate::handles::{self, Handle};

/// Tunables for pointer interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    pub snap_tolerance: f64,
    pub grid_snap: bool,
    pub grid_size: f64,
    pub min_element_size: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            grid_snap: false,
            grid_size: 10.0,
            min_element_size: 8.0,
        }
    }
}

/// Keyboard modifiers held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };

    /// Whether the event should toggle selection membership instead of
    /// replacing it
    pub fn multi_select(&self) -> bool {
        self.shift || self.ctrl
    }
}

/// The live pointer gesture. Everything needed to preview, commit, or
/// roll back the gesture is captured at press time.
#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    BoxSelecting {
        anchor: Point,
        rect: Rect,
        /// Selection at press time, kept for additive union and cancel
        base: Vec<ElementId>,
        additive: bool,
    },
    DraggingElement {
        /// The element under the pointer; snapping follows its box
        primary: ElementId,
        press: Point,
        /// Press-time position of every unlocked selected element
        origins: Vec<(ElementId, Point)>,
    },
    ResizingOrRotating {
        element: ElementId,
        handle: Handle,
        press: Point,
        /// Bounds and rotation at press time; resize math always works
        /// from this capture, never from intermediate frames
        start: Placement,
    },
    EditingText {
        element: ElementId,
        original: String,
        draft: String,
    },
}

/// Which gesture is live, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Idle,
    BoxSelecting,
    DraggingElement,
    ResizingOrRotating,
    EditingText,
}

pub struct CanvasController {
    deck: Deck,
    history: History,
    active_page: usize,
    pub settings: CanvasSettings,
    gesture: Gesture,
    guides: Vec<GuideLine>,
}

impl CanvasController {
    pub fn new(deck: Deck) -> Self {
        Self::with_history(deck, History::new())
    }

    /// Attach a caller-owned history, e.g. one whose capacity or status
    /// callback is already configured
    pub fn with_history(deck: Deck, history: History) -> Self {
        Self {
            deck,
            history,
            active_page: 0,
            settings: CanvasSettings::default(),
            gesture: Gesture::Idle,
            guides: Vec::new(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    /// Switch pages, abandoning any in-flight gesture
    pub fn set_active_page(&mut self, index: usize) -> Result<()> {
        if index >= self.deck.page_count() {
            return Err(CanvasError::NoSuchPage(index));
        }
        self.active_page = index;
        self.gesture = Gesture::Idle;
        self.guides.clear();
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.deck
            .page(self.active_page)
            .ok_or(CanvasError::NoSuchPage(self.active_page))
    }

    fn page_mut(&mut self) -> Result<&mut Page> {
        self.deck
            .page_mut(self.active_page)
            .ok_or(CanvasError::NoSuchPage(self.active_page))
    }

    // ----- pointer events -------------------------------------------------

    /// Begin a gesture. Hit priority: selection handle, then element
    /// body (topmost wins), then empty canvas.
    pub fn pointer_pressed(&mut self, point: Point, modifiers: Modifiers) -> Result<()> {
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            self.confirm_text_edit()?;
        }

        let (handle_hit, body_hit) = {
            let page = self.page()?;
            let handle_hit = match (page.selection(), page.selection_bounds()) {
                (&[only], Some(bounds)) => handles::hit_test(bounds, point).and_then(|handle| {
                    // Locked elements expose no resize/rotate gestures.
                    page.element(only)
                        .filter(|e| !e.locked)
                        .map(|e| (only, handle, Placement::of(e)))
                }),
                _ => None,
            };
            let body_hit = if handle_hit.is_some() {
                None
            } else {
                page.topmost_hit(point)
            };
            (handle_hit, body_hit)
        };

        if let Some((element, handle, start)) = handle_hit {
            debug!(?handle, %element, "resize gesture started");
            self.gesture = Gesture::ResizingOrRotating {
                element,
                handle,
                press: point,
                start,
            };
            return Ok(());
        }

        if let Some(hit) = body_hit {
            let page = self.page_mut()?;
            if modifiers.multi_select() {
                if !page.toggle_selected(hit) {
                    // Toggled off: selection changed, but no drag starts.
                    return Ok(());
                }
            } else if page.selection() != std::slice::from_ref(&hit) {
                // A plain press keeps the selection only when the hit is
                // already its sole member; pressing one member of a group
                // collapses the group to that element.
                page.select_only(hit);
            }
            let origins: Vec<(ElementId, Point)> = page
                .selection()
                .iter()
                .filter_map(|&id| {
                    page.element(id)
                        .filter(|e| !e.locked)
                        .map(|e| (id, e.position()))
                })
                .collect();
            if origins.iter().any(|(id, _)| *id == hit) {
                self.gesture = Gesture::DraggingElement {
                    primary: hit,
                    press: point,
                    origins,
                };
            }
            return Ok(());
        }

        let page = self.page_mut()?;
        let base = page.selection().to_vec();
        let additive = modifiers.multi_select();
        if !additive {
            page.clear_selection();
        }
        self.gesture = Gesture::BoxSelecting {
            anchor: point,
            rect: Rect::new(point.x, point.y, 0.0, 0.0),
            base,
            additive,
        };
        Ok(())
    }

    /// Advance the live gesture to a new pointer position
    pub fn pointer_moved(&mut self, point: Point) -> Result<()> {
        match self.gesture.clone() {
            Gesture::Idle | Gesture::EditingText { .. } => Ok(()),
            Gesture::BoxSelecting {
                anchor,
                base,
                additive,
                ..
            } => {
                let rect = Rect::from_corners(anchor, point);
                let page = self.page_mut()?;
                let hits = page.elements_in_rect(&rect);
                let selected = if additive {
                    let mut merged = base.clone();
                    for id in hits {
                        if !merged.contains(&id) {
                            merged.push(id);
                        }
                    }
                    merged
                } else {
                    hits
                };
                page.set_selection(selected);
                self.gesture = Gesture::BoxSelecting {
                    anchor,
                    rect,
                    base,
                    additive,
                };
                Ok(())
            }
            Gesture::DraggingElement {
                primary,
                press,
                origins,
            } => {
                let Some(&(_, origin)) = origins.iter().find(|(id, _)| *id == primary) else {
                    return Ok(());
                };
                let proposed = Point::new(
                    origin.x + point.x - press.x,
                    origin.y + point.y - press.y,
                );
                let (corrected, guides) = if self.settings.grid_snap {
                    let grid = self.settings.grid_size;
                    let quantized = Point::new(
                        (proposed.x / grid).round() * grid,
                        (proposed.y / grid).round() * grid,
                    );
                    (quantized, Vec::new())
                } else {
                    let canvas = self.deck.canvas;
                    let tolerance = self.settings.snap_tolerance;
                    let page = self.page()?;
                    let bounds = page.require(primary)?.bounds;
                    let moving = Rect::new(proposed.x, proposed.y, bounds.width, bounds.height);
                    let others: Vec<Rect> = page
                        .elements()
                        .iter()
                        .filter(|e| e.visible && !page.is_selected(e.id()))
                        .map(|e| e.bounds)
                        .collect();
                    let snap = resolve_snap(moving, canvas, &others, tolerance);
                    (Point::new(snap.x, snap.y), snap.guides)
                };
                let delta = Point::new(corrected.x - origin.x, corrected.y - origin.y);
                let page = self.page_mut()?;
                for (id, start) in &origins {
                    if let Some(element) = page.element_mut(*id) {
                        element.set_position(Point::new(start.x + delta.x, start.y + delta.y));
                    }
                }
                self.guides = guides;
                Ok(())
            }
            Gesture::ResizingOrRotating {
                element,
                handle,
                press,
                start,
            } => {
                let min_size = self.settings.min_element_size;
                let page = self.page_mut()?;
                let target = page.require_mut(element)?;
                if handle.is_rotate() {
                    let delta = handles::rotation_delta(start.bounds.center(), press, point);
                    target.rotation = start.rotation + delta;
                } else {
                    target.bounds = handles::resize(
                        start.bounds,
                        handle,
                        point.x - press.x,
                        point.y - press.y,
                        min_size,
                    );
                }
                Ok(())
            }
        }
    }

    /// End the live gesture, committing at most one command to the
    /// history. A gesture that left the geometry untouched commits
    /// nothing.
    pub fn pointer_released(&mut self) -> Result<()> {
        self.guides.clear();
        if matches!(self.gesture, Gesture::EditingText { .. }) {
            return Ok(());
        }
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::DraggingElement { origins, .. } => {
                let page_id = self.page()?.id();
                let mut moves: Vec<Box<dyn Command>> = Vec::new();
                for (id, origin) in origins {
                    let current = self.page()?.require(id)?.position();
                    if current != origin {
                        moves.push(Box::new(MoveElement::new(page_id, id, origin, current)));
                    }
                }
                if !moves.is_empty() {
                    self.history
                        .execute_batch(&mut self.deck, "Move Elements", moves)?;
                }
            }
            Gesture::ResizingOrRotating { element, start, .. } => {
                let page_id = self.page()?.id();
                let current = Placement::of(self.page()?.require(element)?);
                if current != start {
                    self.history.execute(
                        &mut self.deck,
                        Box::new(ScaleElement::new(page_id, element, start, current)),
                    )?;
                }
            }
            Gesture::BoxSelecting { .. } | Gesture::Idle | Gesture::EditingText { .. } => {}
        }
        Ok(())
    }

    /// Double press opens inline editing on text-bearing elements and
    /// does nothing on anything else
    pub fn double_pressed(&mut self, point: Point) -> Result<()> {
        let hit = {
            let page = self.page()?;
            page.topmost_hit(point).and_then(|id| {
                page.element(id)
                    .and_then(|e| e.text_content().map(|text| (id, text.to_string())))
            })
        };
        if let Some((element, original)) = hit {
            self.page_mut()?.select_only(element);
            self.gesture = Gesture::EditingText {
                element,
                draft: original.clone(),
                original,
            };
        }
        Ok(())
    }

    /// Abandon the live gesture without committing anything. Dragged
    /// elements return to their press-time positions; an abandoned box
    /// select restores the press-time selection. Resizing is not
    /// cancelable and keeps running.
    pub fn cancel_gesture(&mut self) -> Result<()> {
        match self.gesture.clone() {
            Gesture::Idle | Gesture::ResizingOrRotating { .. } => Ok(()),
            Gesture::BoxSelecting { base, .. } => {
                self.page_mut()?.set_selection(base);
                self.gesture = Gesture::Idle;
                Ok(())
            }
            Gesture::DraggingElement { origins, .. } => {
                let page = self.page_mut()?;
                for (id, origin) in origins {
                    if let Some(element) = page.element_mut(id) {
                        element.set_position(origin);
                    }
                }
                self.guides.clear();
                self.gesture = Gesture::Idle;
                Ok(())
            }
            Gesture::EditingText { .. } => {
                self.gesture = Gesture::Idle;
                Ok(())
            }
        }
    }

    // ----- inline text editing --------------------------------------------

    /// Replace the in-progress draft. The model is untouched until
    /// [`Self::confirm_text_edit`].
    pub fn set_text_draft(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.gesture {
            Gesture::EditingText { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            _ => Err(CanvasError::NotEditingText),
        }
    }

    /// Commit the draft as one EditText command, iff it differs from
    /// the press-time text
    pub fn confirm_text_edit(&mut self) -> Result<()> {
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::EditingText {
                element,
                original,
                draft,
            } => {
                if draft != original {
                    let page_id = self.page()?.id();
                    self.history.execute(
                        &mut self.deck,
                        Box::new(EditText::new(page_id, element, original, draft)),
                    )?;
                }
                Ok(())
            }
            other => {
                self.gesture = other;
                Err(CanvasError::NotEditingText)
            }
        }
    }

    /// Discard the draft and leave the model as it was
    pub fn cancel_text_edit(&mut self) -> Result<()> {
        if !matches!(self.gesture, Gesture::EditingText { .. }) {
            return Err(CanvasError::NotEditingText);
        }
        self.gesture = Gesture::Idle;
        Ok(())
    }

    // ----- renderer snapshots ---------------------------------------------

    pub fn gesture_kind(&self) -> GestureKind {
        match self.gesture {
            Gesture::Idle => GestureKind::Idle,
            Gesture::BoxSelecting { .. } => GestureKind::BoxSelecting,
            Gesture::DraggingElement { .. } => GestureKind::DraggingElement,
            Gesture::ResizingOrRotating { .. } => GestureKind::ResizingOrRotating,
            Gesture::EditingText { .. } => GestureKind::EditingText,
        }
    }

    pub fn selection(&self) -> &[ElementId] {
        self.deck
            .page(self.active_page)
            .map(|page| page.selection())
            .unwrap_or(&[])
    }

    /// Guides justifying the current drag correction; empty outside a
    /// snapping drag tick
    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    /// Handle hit regions, present only when exactly one element is
    /// selected
    pub fn selection_handles(&self) -> Option<[(Handle, Rect); 9]> {
        let page = self.deck.page(self.active_page)?;
        if page.selection().len() != 1 {
            return None;
        }
        page.selection_bounds().map(handles::handle_rects)
    }

    /// The marquee rectangle while box-selecting
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::BoxSelecting { rect, .. } => Some(rect),
            _ => None,
        }
    }

    // ----- edits routed through the history -------------------------------

    /// Add one element to the active page, returning its id
    pub fn insert_element(&mut self, element: Element) -> Result<ElementId> {
        let page_id = self.page()?.id();
        let id = element.id();
        self.history
            .execute(&mut self.deck, Box::new(AddElements::single(page_id, element)))?;
        Ok(id)
    }

    /// Delete every selected element as one undoable step
    pub fn delete_selection(&mut self) -> Result<()> {
        let page = self.page()?;
        if page.selection().is_empty() {
            return Ok(());
        }
        let command = DeleteElements::capture(page, &page.selection().to_vec());
        self.history.execute(&mut self.deck, Box::new(command))?;
        Ok(())
    }

    /// Move every unlocked selected element by a fixed offset (arrow
    /// keys)
    pub fn nudge_selection(&mut self, dx: f64, dy: f64) -> Result<()> {
        let page = self.page()?;
        let page_id = page.id();
        let moves: Vec<Box<dyn Command>> = page
            .selection()
            .iter()
            .filter_map(|&id| page.element(id).filter(|e| !e.locked))
            .map(|e| {
                let before = e.position();
                let after = Point::new(before.x + dx, before.y + dy);
                Box::new(MoveElement::new(page_id, e.id(), before, after)) as Box<dyn Command>
            })
            .collect();
        if !moves.is_empty() {
            self.history
                .execute_batch(&mut self.deck, "Move Elements", moves)?;
        }
        Ok(())
    }

    pub fn add_page(&mut self, name: impl Into<String>) -> Result<()> {
        self.history
            .execute(&mut self.deck, Box::new(AddPage::append(Page::new(name))))?;
        Ok(())
    }

    /// Out-of-range indices are ignored, matching the page commands
    pub fn remove_page(&mut self, index: usize) -> Result<()> {
        match RemovePage::capture(&self.deck, index) {
            Some(command) => {
                self.history.execute(&mut self.deck, Box::new(command))?;
                if self.active_page >= self.deck.page_count() {
                    self.active_page = self.deck.page_count().saturating_sub(1);
                }
                Ok(())
            }
            None => {
                warn!(index = index as i64, "remove_page index out of range");
                Ok(())
            }
        }
    }

    pub fn rename_page(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let page = self
            .deck
            .page(index)
            .ok_or(CanvasError::NoSuchPage(index))?;
        let command = RenamePage::new(page.id(), page.name.clone(), name);
        self.history.execute(&mut self.deck, Box::new(command))?;
        Ok(())
    }

    // ----- history passthrough --------------------------------------------

    pub fn undo(&mut self) -> Result<bool> {
        Ok(self.history.undo(&mut self.deck)?)
    }

    pub fn redo(&mut self) -> Result<bool> {
        Ok(self.history.redo(&mut self.deck)?)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn set_status_callback(&mut self, callback: impl FnMut(&str) + 'static) {
        self.history.set_status_callback(callback);
    }
}

//! Move, copy/paste and delete on the current selection.
//!
//! Each operation checks every affected element first and writes only when
//! all of them pass, so a rejected call leaves the store untouched.

use solar_core::error::{PlanError, Result};
use solar_math::Vector2;
use tracing::{debug, warn};

use crate::planner::Planner;
use crate::types::*;

/// Copied element data, detached from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardItem {
    Obstacle(Obstacle),
    Beam(Beam),
    Panel(Panel),
    Text(TextAnnotation),
}

impl ClipboardItem {
    fn translated(&self, delta: Vector2) -> Self {
        let mut item = self.clone();
        match &mut item {
            ClipboardItem::Obstacle(o) => o.translate(delta),
            ClipboardItem::Beam(b) => b.translate(delta),
            ClipboardItem::Panel(p) => p.translate(delta),
            ClipboardItem::Text(t) => t.translate(delta),
        }
        item
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    items: Vec<ClipboardItem>,
}

impl Clipboard {
    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Planner {
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Check a prospective element against the bound that applies to its kind.
    fn check_item(&self, item: &ClipboardItem) -> Result<()> {
        match item {
            ClipboardItem::Beam(b) => self.check_beam(b),
            ClipboardItem::Panel(p) => self.check_panel(p),
            ClipboardItem::Obstacle(_) | ClipboardItem::Text(_) => Ok(()),
        }
    }

    fn snapshot(&self, element: ElementRef) -> Option<ClipboardItem> {
        let layout = &self.layout;
        match element {
            ElementRef::Obstacle(id) => layout.obstacle(id).cloned().map(ClipboardItem::Obstacle),
            ElementRef::Beam(id) => layout.beam(id).cloned().map(ClipboardItem::Beam),
            ElementRef::Panel(id) => layout.panel(id).cloned().map(ClipboardItem::Panel),
            ElementRef::Text(id) => layout.text(id).cloned().map(ClipboardItem::Text),
        }
    }

    /// Translate every selected element, or none of them.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.selection.retain_live(&self.layout);
        let delta = Vector2::new(dx, dy);

        for &element in self.selection.entries() {
            if let Some(item) = self.snapshot(element) {
                if let Err(e) = self.check_item(&item.translated(delta)) {
                    warn!(?element, dx, dy, "move rejected");
                    return Err(e);
                }
            }
        }

        for &element in self.selection.entries() {
            match element {
                ElementRef::Obstacle(id) => {
                    if let Some(o) = self.layout.obstacles.get_mut(id) {
                        o.translate(delta);
                    }
                }
                ElementRef::Beam(id) => {
                    if let Some(b) = self.layout.beams.get_mut(id) {
                        b.translate(delta);
                    }
                }
                ElementRef::Panel(id) => {
                    if let Some(p) = self.layout.panels.get_mut(id) {
                        p.translate(delta);
                    }
                }
                ElementRef::Text(id) => {
                    if let Some(t) = self.layout.texts.get_mut(id) {
                        t.translate(delta);
                    }
                }
            }
        }
        debug!(count = self.selection.len(), dx, dy, "selection moved");
        Ok(())
    }

    /// Snapshot the selected elements. Returns how many were copied.
    pub fn copy_selected(&mut self) -> usize {
        self.selection.retain_live(&self.layout);
        let items: Vec<ClipboardItem> = self
            .selection
            .entries()
            .iter()
            .filter_map(|&e| self.snapshot(e))
            .collect();
        self.clipboard.items = items;
        self.clipboard.items.len()
    }

    /// Append the clipboard offset by `(dx, dy)` and select the copies.
    /// All copies must fit their bounds or nothing is pasted.
    pub fn paste(&mut self, dx: f64, dy: f64) -> Result<Vec<ElementRef>> {
        if self.clipboard.is_empty() {
            return Ok(Vec::new());
        }
        let delta = Vector2::new(dx, dy);
        let items: Vec<ClipboardItem> = self
            .clipboard
            .items
            .iter()
            .map(|item| item.translated(delta))
            .collect();

        for item in &items {
            if let Err(e) = self.check_item(item) {
                warn!(dx, dy, "paste rejected");
                return Err(e);
            }
        }

        let pasted: Vec<ElementRef> = items
            .into_iter()
            .map(|item| match item {
                ClipboardItem::Obstacle(o) => ElementRef::Obstacle(self.layout.obstacles.insert(o)),
                ClipboardItem::Beam(b) => ElementRef::Beam(self.layout.beams.insert(b)),
                ClipboardItem::Panel(p) => ElementRef::Panel(self.layout.panels.insert(p)),
                ClipboardItem::Text(t) => ElementRef::Text(self.layout.texts.insert(t)),
            })
            .collect();
        self.selection.replace(pasted.iter().copied());
        debug!(count = pasted.len(), dx, dy, "clipboard pasted");
        Ok(pasted)
    }

    /// Remove every selected element and clear the selection.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self
            .selection
            .entries()
            .iter()
            .filter(|&&e| self.layout.remove(e))
            .count();
        self.selection.clear();
        debug!(removed, "selection deleted");
        removed
    }

    pub fn delete(&mut self, element: ElementRef) -> Result<()> {
        if !self.layout.remove(element) {
            return Err(PlanError::NotFound(format!("{} {:?}", element.kind(), element)));
        }
        self.selection.remove(element);
        Ok(())
    }
}

//! Single-element selection for editing.
//!
//! Selection is scoped to the active slide and is not edit history.
//! It is cleared on background click, element removal and slide switch.

use crate::types::ElementId;

/// At most one selected element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an element, replacing any previous selection.
    pub fn select(&mut self, id: ElementId) {
        tracing::debug!(element = %id, "Element selected");
        self.selected = Some(id);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            tracing::debug!("Selection cleared");
        }
    }

    /// Clear only if `id` is the selected element.
    pub fn forget(&mut self, id: &ElementId) {
        if self.is_selected(id) {
            self.clear();
        }
    }

    /// The selected element id.
    pub fn get(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous() {
        let mut sel = Selection::new();
        sel.select(ElementId::new("a"));
        sel.select(ElementId::new("b"));
        assert!(sel.is_selected(&ElementId::new("b")));
        assert!(!sel.is_selected(&ElementId::new("a")));
    }

    #[test]
    fn forget_only_clears_matching() {
        let mut sel = Selection::new();
        sel.select(ElementId::new("a"));
        sel.forget(&ElementId::new("b"));
        assert!(!sel.is_empty());
        sel.forget(&ElementId::new("a"));
        assert!(sel.is_empty());
    }
}

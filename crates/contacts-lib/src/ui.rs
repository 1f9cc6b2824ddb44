//! UI coordination state.
//!
//! Tracks which form or modal is open and which entity it refers to. The
//! stores never read this; it exists so presentation collaborators share one
//! view of "what is the user working on".

use serde::{Deserialize, Serialize};

/// What a pending delete confirmation would remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A contact and, through the cascade, its interactions.
    Contact(String),
    Interaction(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct UiState {
    pub is_contact_form_open: bool,
    pub is_interaction_form_open: bool,
    pub is_delete_modal_open: bool,
    pub current_contact_id: Option<String>,
    pub current_interaction_id: Option<String>,
    pub dark_mode: bool,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the contact form, for editing `contact_id` or creating when `None`.
    pub fn open_contact_form(&mut self, contact_id: Option<&str>) {
        self.is_contact_form_open = true;
        self.current_contact_id = contact_id.map(str::to_string);
    }

    pub fn close_contact_form(&mut self) {
        self.is_contact_form_open = false;
        self.current_contact_id = None;
    }

    pub fn open_interaction_form(&mut self, contact_id: &str, interaction_id: Option<&str>) {
        self.is_interaction_form_open = true;
        self.current_contact_id = Some(contact_id.to_string());
        self.current_interaction_id = interaction_id.map(str::to_string);
    }

    /// Close the interaction form. The current contact stays selected.
    pub fn close_interaction_form(&mut self) {
        self.is_interaction_form_open = false;
        self.current_interaction_id = None;
    }

    pub fn open_delete_modal(&mut self, contact_id: Option<&str>, interaction_id: Option<&str>) {
        self.is_delete_modal_open = true;
        self.current_contact_id = contact_id.map(str::to_string);
        self.current_interaction_id = interaction_id.map(str::to_string);
    }

    pub fn close_delete_modal(&mut self) {
        self.is_delete_modal_open = false;
        self.current_contact_id = None;
        self.current_interaction_id = None;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Entity the delete modal would remove; an interaction wins over a
    /// contact.
    #[must_use]
    pub fn delete_target(&self) -> Option<DeleteTarget> {
        if !self.is_delete_modal_open {
            return None;
        }
        self.current_interaction_id
            .clone()
            .map(DeleteTarget::Interaction)
            .or_else(|| self.current_contact_id.clone().map(DeleteTarget::Contact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form() {
        let mut ui = UiState::new();
        ui.open_contact_form(Some("ct-1"));
        assert!(ui.is_contact_form_open);
        assert_eq!(ui.current_contact_id.as_deref(), Some("ct-1"));

        ui.close_contact_form();
        assert!(!ui.is_contact_form_open);
        assert!(ui.current_contact_id.is_none());

        ui.open_contact_form(None);
        assert!(ui.is_contact_form_open);
        assert!(ui.current_contact_id.is_none());
    }

    #[test]
    fn test_interaction_form_keeps_contact_on_close() {
        let mut ui = UiState::new();
        ui.open_interaction_form("ct-1", Some("ix-1"));
        assert_eq!(ui.current_interaction_id.as_deref(), Some("ix-1"));

        ui.close_interaction_form();
        assert!(!ui.is_interaction_form_open);
        assert!(ui.current_interaction_id.is_none());
        assert_eq!(ui.current_contact_id.as_deref(), Some("ct-1"));
    }

    #[test]
    fn test_delete_target_precedence() {
        let mut ui = UiState::new();
        assert!(ui.delete_target().is_none());

        ui.open_delete_modal(Some("ct-1"), None);
        assert_eq!(ui.delete_target(), Some(DeleteTarget::Contact("ct-1".to_string())));

        ui.open_delete_modal(Some("ct-1"), Some("ix-2"));
        assert_eq!(ui.delete_target(), Some(DeleteTarget::Interaction("ix-2".to_string())));

        ui.close_delete_modal();
        assert!(ui.delete_target().is_none());
        assert!(ui.current_contact_id.is_none());
    }

    #[test]
    fn test_toggle_dark_mode() {
        let mut ui = UiState::new();
        ui.toggle_dark_mode();
        assert!(ui.dark_mode);
        ui.toggle_dark_mode();
        assert!(!ui.dark_mode);
    }
}

//! Validation helpers for form and command input.
//!
//! The stores accept any well-typed payload; these routines run first, in
//! the presentation layer, and return structured errors without touching
//! storage.

use crate::error::ValidationError;
use crate::query::{ContactDraft, InteractionDraft};

/// Validates contact drafts.
pub struct ContactValidator;

impl ContactValidator {
    /// Validate a contact draft and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(draft: &ContactDraft) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if draft.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "cannot be empty"));
        }
        if draft.email.trim().is_empty() {
            errors.push(ValidationError::new("email", "cannot be empty"));
        }
        if draft.tags.iter().any(|t| t.trim().is_empty()) {
            errors.push(ValidationError::new("tags", "cannot contain blank tags"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Validates interaction drafts.
pub struct InteractionValidator;

impl InteractionValidator {
    /// Validate an interaction draft.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if the content is blank.
    pub fn validate(draft: &InteractionDraft) -> Result<(), Vec<ValidationError>> {
        if draft.content.trim().is_empty() {
            return Err(vec![ValidationError::new("content", "cannot be empty")]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InteractionType;

    #[test]
    fn test_valid_contact() {
        let draft = ContactDraft::new("Jane", "jane@example.com").with_tags(["vip"]);
        assert!(ContactValidator::validate(&draft).is_ok());
    }

    #[test]
    fn test_blank_name_and_email_reported_together() {
        let draft = ContactDraft::new("  ", "");
        let errors = ContactValidator::validate(&draft).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
    }

    #[test]
    fn test_blank_tag_rejected() {
        let draft = ContactDraft::new("Jane", "jane@example.com").with_tags([" "]);
        let errors = ContactValidator::validate(&draft).unwrap_err();
        assert_eq!(errors[0].field, "tags");
    }

    #[test]
    fn test_interaction_content_required() {
        let blank = InteractionDraft::new(InteractionType::Call, " \n ");
        assert!(InteractionValidator::validate(&blank).is_err());
        let ok = InteractionDraft::new(InteractionType::Call, "Discussed terms");
        assert!(InteractionValidator::validate(&ok).is_ok());
    }
}

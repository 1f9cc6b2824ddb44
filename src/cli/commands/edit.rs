use anyhow::{Result, bail};
use contacts_lib::{ContactDraft, ContactValidator, TrackerError};

use crate::cli::{CommandContext, EditArgs, settle};

/// Execute the edit command.
///
/// Omitted fields keep their current values; the merged draft then replaces
/// the contact in full.
///
/// # Errors
///
/// Returns an error if the contact does not exist or validation fails.
pub fn execute(args: EditArgs, ctx: &mut CommandContext) -> Result<()> {
    let id = args.id.clone();
    let Some(current) = ctx.tracker.get_contact_by_id(&id) else {
        bail!("Contact not found: {id}");
    };

    let draft = merge(ContactDraft::from(current), Changes::from(args));
    ContactValidator::validate(&draft).map_err(TrackerError::from_validation_errors)?;

    let Some(contact) = settle(ctx.tracker.update_contact(&id, draft.normalized())) else {
        bail!("Contact not found: {id}");
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        println!("Updated {}: {}", contact.id, contact.name);
    }
    Ok(())
}

/// Field changes requested on the command line.
#[derive(Debug, Default)]
struct Changes {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    tags: Option<Vec<String>>,
}

impl From<EditArgs> for Changes {
    fn from(args: EditArgs) -> Self {
        let tags = if args.clear_tags {
            Some(Vec::new())
        } else if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        };
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            tags,
        }
    }
}

fn merge(mut draft: ContactDraft, changes: Changes) -> ContactDraft {
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(email) = changes.email {
        draft.email = email;
    }
    if let Some(phone) = changes.phone {
        draft.phone = Some(phone);
    }
    if let Some(company) = changes.company {
        draft.company = Some(company);
    }
    if let Some(tags) = changes.tags {
        draft.tags = tags.into_iter().collect();
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> ContactDraft {
        ContactDraft::new("Jane", "jane@example.com")
            .with_phone("555-0100")
            .with_company("Acme")
            .with_tags(["vip"])
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let merged = merge(
            existing(),
            Changes {
                email: Some("jane@acme.test".to_string()),
                ..Changes::default()
            },
        );
        assert_eq!(merged.name, "Jane");
        assert_eq!(merged.email, "jane@acme.test");
        assert_eq!(merged.phone.as_deref(), Some("555-0100"));
        assert!(merged.tags.contains("vip"));
    }

    #[test]
    fn test_clear_tags_flag() {
        let changes = Changes::from(EditArgs {
            id: "ct-1".to_string(),
            clear_tags: true,
            ..EditArgs::default()
        });
        assert_eq!(changes.tags, Some(Vec::new()));
        assert!(changes.name.is_none());
    }

    #[test]
    fn test_empty_optional_clears_after_normalize() {
        let merged = merge(
            existing(),
            Changes {
                phone: Some(String::new()),
                tags: Some(Vec::new()),
                ..Changes::default()
            },
        )
        .normalized();
        assert!(merged.phone.is_none());
        assert!(merged.tags.is_empty());
        assert_eq!(merged.company.as_deref(), Some("Acme"));
    }
}

use anyhow::Result;
use contacts_lib::{ContactDraft, ContactValidator, TrackerError};

use crate::cli::{AddArgs, CommandContext, settle};

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn execute(args: AddArgs, ctx: &mut CommandContext) -> Result<()> {
    let mut draft = ContactDraft::new(args.name, args.email).with_tags(args.tags);
    draft.phone = args.phone;
    draft.company = args.company;

    ContactValidator::validate(&draft).map_err(TrackerError::from_validation_errors)?;

    let contact = settle(ctx.tracker.add_contact(draft.normalized()));

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        println!("Created {}: {}", contact.id, contact.name);
    }
    Ok(())
}

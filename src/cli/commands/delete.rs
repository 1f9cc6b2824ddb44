use anyhow::{Result, bail};

use crate::cli::{CommandContext, settle};

/// Execute the delete command. Interactions of the contact go with it.
///
/// # Errors
///
/// Returns an error if no contact has the id. Dangling interactions that
/// reference it are still removed.
pub fn execute(id: &str, ctx: &mut CommandContext) -> Result<()> {
    let removed = settle(ctx.tracker.delete_contact_and_interactions(id));
    let Some(contact) = removed.contact else {
        if !removed.interactions.is_empty() {
            eprintln!(
                "Removed {} interaction(s) left over from {id}",
                removed.interactions.len()
            );
        }
        bail!("Contact not found: {id}");
    };

    if ctx.json {
        let output = serde_json::json!({
            "deleted": contact.id,
            "interactions_deleted": removed.interactions.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Deleted {}: {} ({} interaction(s))",
            contact.id,
            contact.name,
            removed.interactions.len()
        );
    }
    Ok(())
}

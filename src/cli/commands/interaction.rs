//! Interaction commands.

use anyhow::{Result, bail};
use contacts_lib::{InteractionDraft, InteractionValidator, TrackerError};

use crate::cli::{CommandContext, InteractionSubcommand, settle};
use crate::format::format_interaction_line;

/// Execute an interaction subcommand.
///
/// # Errors
///
/// Returns an error if a referenced contact or interaction does not exist,
/// or the content is blank.
pub fn execute(command: InteractionSubcommand, ctx: &mut CommandContext) -> Result<()> {
    match command {
        InteractionSubcommand::Add(args) => {
            if ctx.tracker.get_contact_by_id(&args.contact_id).is_none() {
                bail!("Contact not found: {}", args.contact_id);
            }
            let draft = InteractionDraft::new(args.kind, args.content.trim());
            InteractionValidator::validate(&draft).map_err(TrackerError::from_validation_errors)?;

            let interaction = settle(ctx.tracker.add_interaction(&args.contact_id, draft));
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&interaction)?);
            } else {
                println!("Logged {} {} for {}", interaction.kind, interaction.id, interaction.contact_id);
            }
        }
        InteractionSubcommand::Edit(args) => {
            let Some(current) = ctx.tracker.get_interaction_by_id(&args.id) else {
                bail!("Interaction not found: {}", args.id);
            };
            let draft = InteractionDraft::new(
                args.kind.unwrap_or(current.kind),
                args.content
                    .as_deref()
                    .map_or_else(|| current.content.clone(), |c| c.trim().to_string()),
            );
            InteractionValidator::validate(&draft).map_err(TrackerError::from_validation_errors)?;

            let Some(interaction) = settle(ctx.tracker.update_interaction(&args.id, draft)) else {
                bail!("Interaction not found: {}", args.id);
            };
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&interaction)?);
            } else {
                println!("Updated {}", interaction.id);
            }
        }
        InteractionSubcommand::Delete { id } => {
            let Some(interaction) = settle(ctx.tracker.delete_interaction(&id)) else {
                bail!("Interaction not found: {id}");
            };
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&interaction)?);
            } else {
                println!("Deleted {}", interaction.id);
            }
        }
        InteractionSubcommand::List { contact_id } => {
            if ctx.tracker.get_contact_by_id(&contact_id).is_none() {
                bail!("Contact not found: {contact_id}");
            }
            let interactions = ctx.tracker.get_interactions_by_contact_id(&contact_id);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&interactions)?);
            } else if interactions.is_empty() {
                println!("No interactions yet.");
            } else {
                for interaction in interactions {
                    println!("{}", format_interaction_line(interaction));
                }
            }
        }
    }
    Ok(())
}

//! Show command implementation.

use anyhow::{Result, bail};

use crate::cli::CommandContext;
use crate::format::{ContactDetails, format_interaction_line, format_tag};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the contact does not exist.
pub fn execute(id: &str, ctx: &CommandContext) -> Result<()> {
    let Some(contact) = ctx.tracker.get_contact_by_id(id) else {
        bail!("Contact not found: {id}");
    };
    let details = ContactDetails::new(contact, &ctx.tracker);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let contact = &details.contact;
    println!("{} {}", contact.id, contact.name);
    println!("Email:   {}", contact.email);
    if let Some(phone) = &contact.phone {
        println!("Phone:   {phone}");
    }
    if let Some(company) = &contact.company {
        println!("Company: {company}");
    }
    if !contact.tags.is_empty() {
        let tags: Vec<String> = contact
            .tags
            .iter()
            .map(|t| format_tag(t, ctx.colored))
            .collect();
        println!("Tags:    {}", tags.join(" "));
    }
    println!("Created: {}", contact.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated: {}", contact.updated_at.format("%Y-%m-%d %H:%M"));

    println!();
    if details.interactions.is_empty() {
        println!("No interactions yet.");
    } else {
        println!("Interactions ({}):", details.interactions.len());
        for interaction in &details.interactions {
            println!("  {}", format_interaction_line(interaction));
        }
    }
    Ok(())
}

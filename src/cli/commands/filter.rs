//! Search, tag filter and tag listing commands.

use anyhow::{Result, bail};

use crate::cli::{CommandContext, FilterSubcommand, settle};
use crate::cli::commands::list::print_page;
use crate::format::{TagSummary, format_tag};

/// Execute the search command. No query clears the search.
///
/// # Errors
///
/// Returns an error if output cannot be serialized.
pub fn execute_search(query: Option<String>, ctx: &mut CommandContext) -> Result<()> {
    settle(ctx.tracker.set_search_query(query.unwrap_or_default()));
    print_page(ctx)
}

/// Execute a filter subcommand and list the result.
///
/// # Errors
///
/// Returns an error if the tag is blank.
pub fn execute(command: FilterSubcommand, ctx: &mut CommandContext) -> Result<()> {
    match command {
        FilterSubcommand::Add { tag } => {
            let tag = clean_tag(&tag)?;
            if !settle(ctx.tracker.set_tag_filter(tag)) {
                eprintln!("Already filtering by {}", format_tag(tag, false));
            }
        }
        FilterSubcommand::Remove { tag } => {
            let tag = clean_tag(&tag)?;
            if !settle(ctx.tracker.remove_tag_filter(tag)) {
                eprintln!("Not filtering by {}", format_tag(tag, false));
            }
        }
        FilterSubcommand::Clear => settle(ctx.tracker.clear_filters()),
    }
    print_page(ctx)
}

/// Execute the tags command.
///
/// # Errors
///
/// Returns an error if output cannot be serialized.
pub fn execute_tags(ctx: &CommandContext) -> Result<()> {
    let summary = TagSummary::collect(&ctx.tracker);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if summary.is_empty() {
        println!("No tags in use.");
    } else {
        let active = &ctx.tracker.contacts().filters().tags;
        for entry in &summary {
            let marker = if active.contains(&entry.tag) { " (filtering)" } else { "" };
            println!(
                "{} {}{}",
                format_tag(&entry.tag, ctx.colored),
                entry.contacts,
                marker
            );
        }
    }
    Ok(())
}

fn clean_tag(tag: &str) -> Result<&str> {
    let tag = tag.trim();
    if tag.is_empty() {
        bail!("Tag cannot be empty");
    }
    Ok(tag)
}

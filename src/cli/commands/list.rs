//! List command implementation.
//!
//! Prints the current page of the filtered contact list. Search, tag
//! filters and the page number are persisted, so `list` shows the same view
//! until they change.

use anyhow::{Result, bail};

use crate::cli::{CommandContext, ListArgs, settle};
use crate::format::{ContactPage, format_contact_line, format_page_summary, format_tag};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if `--page` is 0 or output cannot be serialized.
pub fn execute(args: &ListArgs, ctx: &mut CommandContext) -> Result<()> {
    if let Some(page) = args.page {
        return execute_page(page, ctx);
    }
    print_page(ctx)
}

/// Execute the page command: move to `page` and list it.
///
/// # Errors
///
/// Returns an error if `page` is 0.
pub fn execute_page(page: usize, ctx: &mut CommandContext) -> Result<()> {
    if page == 0 {
        bail!("Page numbers start at 1");
    }
    settle(ctx.tracker.set_page(page));
    print_page(ctx)
}

/// Print the current page in the context's output format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_page(ctx: &CommandContext) -> Result<()> {
    let view = ContactPage::from_tracker(&ctx.tracker);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(line) = describe_filters(&view, ctx.colored) {
        println!("{line}");
    }
    if view.contacts.is_empty() {
        println!("No contacts found.");
    } else {
        for contact in &view.contacts {
            println!("{}", format_contact_line(contact, ctx.colored));
        }
    }
    println!(
        "\n{}",
        format_page_summary(
            view.page,
            view.filtered_total_pages,
            view.total_pages,
            view.matching
        )
    );
    Ok(())
}

fn describe_filters(view: &ContactPage, colored: bool) -> Option<String> {
    let mut parts = Vec::new();
    if !view.search.is_empty() {
        parts.push(format!("search \"{}\"", view.search));
    }
    if !view.tags.is_empty() {
        let tags: Vec<String> = view.tags.iter().map(|t| format_tag(t, colored)).collect();
        parts.push(format!("tags {}", tags.join(" ")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filtered by {}", parts.join(", ")))
    }
}

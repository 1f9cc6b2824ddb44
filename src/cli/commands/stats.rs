//! Stats command implementation.

use anyhow::Result;

use crate::cli::CommandContext;
use crate::format::TrackerStats;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if output cannot be serialized.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let stats = TrackerStats::from_tracker(&ctx.tracker);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{} {} and {} {} loaded",
        stats.contacts,
        plural(stats.contacts, "contact", "contacts"),
        stats.interactions,
        plural(stats.interactions, "interaction", "interactions"),
    );
    println!("Tags in use: {}", stats.tags);
    if stats.matching != stats.contacts {
        println!("Matching current filters: {}", stats.matching);
    }
    Ok(())
}

const fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

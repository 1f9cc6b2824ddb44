//! Text formatting functions for `ct`.
//!
//! Plain one-line renderings for terminal output:
//! - Tag chips (`#client`), optionally coloured from a fixed palette
//! - Contact and interaction lines
//! - Paging summary

use contacts_lib::{Contact, Interaction};
use crossterm::style::{Color, Stylize, style};

/// Colour names a tag can be rendered in.
pub const TAG_COLORS: [&str; 5] = ["red", "blue", "green", "yellow", "purple"];

/// Palette entry for `tag`: the sum of its UTF-16 code units modulo the
/// palette size. Stable across runs and machines.
#[must_use]
pub fn tag_color(tag: &str) -> &'static str {
    let sum = tag
        .encode_utf16()
        .fold(0usize, |acc, unit| acc.wrapping_add(usize::from(unit)));
    TAG_COLORS[sum % TAG_COLORS.len()]
}

fn terminal_color(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "purple" => Color::Magenta,
        _ => Color::Reset,
    }
}

/// Format a tag as `#tag`, in its palette colour when `colored`.
#[must_use]
pub fn format_tag(tag: &str, colored: bool) -> String {
    let chip = format!("#{tag}");
    if colored {
        style(chip).with(terminal_color(tag_color(tag))).to_string()
    } else {
        chip
    }
}

/// Format a single-line contact summary.
///
/// Format: `{id} {name} <{email}> ({company}) #{tag}...`
#[must_use]
pub fn format_contact_line(contact: &Contact, colored: bool) -> String {
    let mut line = format!("{} {} <{}>", contact.id, contact.name, contact.email);
    if let Some(company) = &contact.company {
        line.push_str(&format!(" ({company})"));
    }
    for tag in &contact.tags {
        line.push(' ');
        line.push_str(&format_tag(tag, colored));
    }
    line
}

/// Format a single-line interaction summary.
///
/// Format: `{date} [{type}] {id} {content}`; only the first line of the
/// content is shown.
#[must_use]
pub fn format_interaction_line(interaction: &Interaction) -> String {
    let first_line = interaction.content.lines().next().unwrap_or_default();
    let more = if interaction.content.lines().nth(1).is_some() {
        " ..."
    } else {
        ""
    };
    format!(
        "{} [{}] {} {}{}",
        interaction.created_at.format("%Y-%m-%d %H:%M"),
        interaction.kind,
        interaction.id,
        first_line,
        more,
    )
}

/// Paging footer for list views.
///
/// When filters shrink the result set the unfiltered page count is shown
/// alongside the filtered one.
#[must_use]
pub fn format_page_summary(
    page: usize,
    filtered_total_pages: usize,
    total_pages: usize,
    matching: usize,
) -> String {
    let noun = if matching == 1 { "contact" } else { "contacts" };
    if filtered_total_pages == total_pages {
        format!("Page {page} of {total_pages} ({matching} {noun})")
    } else {
        format!(
            "Page {page} of {filtered_total_pages} ({matching} matching {noun}; {total_pages} pages unfiltered)"
        )
    }
}

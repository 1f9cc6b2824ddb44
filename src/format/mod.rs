//! Output formatting for `ct`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! Diagnostics and persistence warnings go to stderr in either mode.
//!
//! # JSON Output Types
//!
//! - [`ContactPage`] - Current page of the filtered list (list/search/page/filter)
//! - [`ContactDetails`] - Contact with interactions (show)
//! - [`TagSummary`] - Tag with colour and usage count (tags)
//! - [`TrackerStats`] - Contact, interaction and tag counts (stats)

mod output;
mod text;

pub use output::{ContactDetails, ContactPage, TagSummary, TrackerStats};
pub use text::{
    TAG_COLORS, format_contact_line, format_interaction_line, format_page_summary, format_tag,
    tag_color,
};

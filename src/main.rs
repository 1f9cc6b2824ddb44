//! `ct` - local-first contact and interaction tracker.
//!
//! Contacts, interaction history, search and tag filters, all kept as JSON
//! snapshots in a local data directory.

use contact_tracker::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

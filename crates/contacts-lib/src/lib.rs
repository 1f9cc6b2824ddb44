//! `contacts-lib`: in-process contact and interaction tracking.
//!
//! Two independent stores hold contacts and the interactions logged against
//! them. `Tracker` ties them together with UI coordination state and
//! snapshot persistence, and owns the one cross-store rule: deleting a
//! contact removes its interactions.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use contacts_lib::{
//!     ContactDraft, FileBackend, InteractionDraft, InteractionType, SystemClock, Tracker,
//! };
//!
//! // Load whatever was saved under the directory
//! let mut tracker = Tracker::open(
//!     Box::new(FileBackend::new(".contacts")),
//!     Arc::new(SystemClock::new()),
//! );
//!
//! // Create
//! let jane = tracker
//!     .add_contact(ContactDraft::new("Jane Doe", "jane@example.com").with_tags(["client"]))
//!     .into_inner();
//! tracker.add_interaction(&jane.id, InteractionDraft::new(InteractionType::Call, "Intro call"));
//!
//! // Query
//! tracker.set_tag_filter("client");
//! for contact in tracker.filtered_contacts() {
//!     println!("{} <{}>", contact.name, contact.email);
//! }
//!
//! // Delete, cascading to interactions
//! tracker.delete_contact_and_interactions(&jane.id);
//! ```

pub mod clock;
pub mod contact_store;
pub mod error;
pub mod interaction_store;
pub mod model;
pub mod query;
pub mod snapshot;
pub mod tracker;
pub mod ui;
pub mod util;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use contact_store::ContactStore;
pub use error::{Result, TrackerError, ValidationError};
pub use interaction_store::InteractionStore;
pub use model::{Contact, Interaction, InteractionType};
pub use query::{ContactDraft, ContactFilters, DEFAULT_PAGE_SIZE, InteractionDraft};
pub use snapshot::{FileBackend, MemoryBackend, SnapshotBackend};
pub use tracker::{RemovedContact, Saved, SharedTracker, Tracker};
pub use ui::{DeleteTarget, UiState};
pub use validation::{ContactValidator, InteractionValidator};

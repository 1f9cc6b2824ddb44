//! Application-level orchestrator.
//!
//! `Tracker` owns one `ContactStore`, one `InteractionStore` and the shared
//! `UiState`, and is the only component that touches both stores in one
//! operation (the contact delete cascade). When opened over a
//! `SnapshotBackend` it writes a snapshot of every store a mutation touched
//! right after the mutation completes.
//!
//! Persistence is best-effort: a failed write never undoes or fails the
//! in-memory operation. The error comes back as a warning in `Saved`, and the
//! record stays pending so the next mutation retries it.

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;

use crate::clock::{Clock, SystemClock};
use crate::contact_store::ContactStore;
use crate::error::{Result, TrackerError};
use crate::interaction_store::InteractionStore;
use crate::model::{Contact, Interaction};
use crate::query::{ContactDraft, InteractionDraft};
use crate::snapshot::{
    self, CONTACT_RECORD, ContactSnapshot, ContactSnapshotRef, INTERACTION_RECORD,
    InteractionSnapshot, InteractionSnapshotRef, SnapshotBackend,
};
use crate::ui::UiState;

/// A tracker shared across threads: many readers or one writer at a time.
pub type SharedTracker = Arc<RwLock<Tracker>>;

/// Result of a mutating operation plus any persistence warning it produced.
#[derive(Debug)]
pub struct Saved<T> {
    pub value: T,
    /// Set when the follow-up snapshot write failed. The in-memory change
    /// has still been applied.
    pub warning: Option<TrackerError>,
}

impl<T> Saved<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warning.is_none()
    }
}

/// What `delete_contact_and_interactions` removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedContact {
    /// The contact, or `None` if no contact had the id.
    pub contact: Option<Contact>,
    /// Interactions that referenced the id.
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pending {
    contacts: bool,
    interactions: bool,
}

impl Pending {
    const CONTACTS: Self = Self {
        contacts: true,
        interactions: false,
    };
    const INTERACTIONS: Self = Self {
        contacts: false,
        interactions: true,
    };
    const BOTH: Self = Self {
        contacts: true,
        interactions: true,
    };

    const fn any(self) -> bool {
        self.contacts || self.interactions
    }
}

/// Stores, UI state and persistence wired together.
pub struct Tracker {
    contacts: ContactStore,
    interactions: InteractionStore,
    ui: UiState,
    backend: Option<Box<dyn SnapshotBackend>>,
    pending: Pending,
    load_warnings: Vec<TrackerError>,
}

impl Tracker {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Tracker with no persistence and the system clock.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Tracker with no persistence and the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            contacts: ContactStore::new(clock.clone()),
            interactions: InteractionStore::new(clock),
            ui: UiState::new(),
            backend: None,
            pending: Pending::default(),
            load_warnings: Vec::new(),
        }
    }

    /// Rehydrate both stores from `backend`.
    ///
    /// Never fails: a record that cannot be read or decoded leaves that store
    /// empty and is reported through `load_warnings`.
    #[must_use]
    pub fn open(backend: Box<dyn SnapshotBackend>, clock: Arc<dyn Clock>) -> Self {
        let mut warnings = Vec::new();
        let contact_state: ContactSnapshot =
            load_record(backend.as_ref(), CONTACT_RECORD, &mut warnings);
        let interaction_state: InteractionSnapshot =
            load_record(backend.as_ref(), INTERACTION_RECORD, &mut warnings);

        tracing::debug!(
            contacts = contact_state.contacts.len(),
            interactions = interaction_state.interactions.len(),
            "tracker loaded"
        );

        Self {
            contacts: ContactStore::restore(
                contact_state.contacts,
                contact_state.filters,
                clock.clone(),
            ),
            interactions: InteractionStore::restore(interaction_state.interactions, clock),
            ui: UiState::new(),
            backend: Some(backend),
            pending: Pending::default(),
            load_warnings: warnings,
        }
    }

    /// Problems met while rehydrating in `open`.
    #[must_use]
    pub fn load_warnings(&self) -> &[TrackerError] {
        &self.load_warnings
    }

    /// Wrap the tracker for use from several threads.
    #[must_use]
    pub fn into_shared(self) -> SharedTracker {
        Arc::new(RwLock::new(self))
    }

    /// Write every record with unsaved changes.
    ///
    /// Records that fail stay pending. Without a backend this only clears
    /// the pending flags.
    ///
    /// # Errors
    ///
    /// Returns the first write error met; later records are still attempted.
    pub fn flush(&mut self) -> Result<()> {
        let Some(backend) = self.backend.as_mut() else {
            self.pending = Pending::default();
            return Ok(());
        };

        let mut first_err = None;

        if self.pending.contacts {
            let written = snapshot::encode(&ContactSnapshotRef {
                contacts: self.contacts.contacts(),
                filters: self.contacts.filters(),
            })
            .and_then(|payload| backend.store(CONTACT_RECORD, &payload));
            match written {
                Ok(()) => self.pending.contacts = false,
                Err(e) => first_err = Some(e),
            }
        }

        if self.pending.interactions {
            let written = snapshot::encode(&InteractionSnapshotRef {
                interactions: self.interactions.interactions(),
            })
            .and_then(|payload| backend.store(INTERACTION_RECORD, &payload));
            match written {
                Ok(()) => self.pending.interactions = false,
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }

        first_err.map_or(Ok(()), Err)
    }

    /// True if some record still has unsaved changes.
    #[must_use]
    pub fn has_pending_writes(&self) -> bool {
        self.pending.any()
    }

    fn persist<T>(&mut self, touched: Pending, value: T) -> Saved<T> {
        self.pending.contacts |= touched.contacts;
        self.pending.interactions |= touched.interactions;
        let warning = self.flush().err();
        if let Some(err) = &warning {
            tracing::warn!(error = %err, "snapshot write failed; will retry on next change");
        }
        Saved { value, warning }
    }

    // ========================================================================
    // Store access
    // ========================================================================

    #[must_use]
    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    #[must_use]
    pub fn interactions(&self) -> &InteractionStore {
        &self.interactions
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    pub fn add_contact(&mut self, draft: ContactDraft) -> Saved<Contact> {
        let contact = self.contacts.add_contact(draft);
        self.persist(Pending::CONTACTS, contact)
    }

    pub fn update_contact(&mut self, id: &str, draft: ContactDraft) -> Saved<Option<Contact>> {
        let updated = self.contacts.update_contact(id, draft);
        self.persist(Pending::CONTACTS, updated)
    }

    /// Delete contact `id` together with every interaction that references it.
    ///
    /// Dangling interactions are removed even when the contact is already
    /// gone.
    pub fn delete_contact_and_interactions(&mut self, id: &str) -> Saved<RemovedContact> {
        let removed = RemovedContact {
            contact: self.contacts.delete_contact(id),
            interactions: self.interactions.delete_interactions_for_contact(id),
        };
        tracing::debug!(
            id,
            found = removed.contact.is_some(),
            interactions = removed.interactions.len(),
            "contact delete cascaded"
        );
        self.persist(Pending::BOTH, removed)
    }

    #[must_use]
    pub fn get_contact_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.get_contact_by_id(id)
    }

    // ========================================================================
    // Filters and paging
    // ========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) -> Saved<()> {
        self.contacts.set_search_query(query);
        self.persist(Pending::CONTACTS, ())
    }

    pub fn set_tag_filter(&mut self, tag: &str) -> Saved<bool> {
        let added = self.contacts.set_tag_filter(tag);
        self.persist(Pending::CONTACTS, added)
    }

    pub fn remove_tag_filter(&mut self, tag: &str) -> Saved<bool> {
        let removed = self.contacts.remove_tag_filter(tag);
        self.persist(Pending::CONTACTS, removed)
    }

    pub fn clear_filters(&mut self) -> Saved<()> {
        self.contacts.clear_filters();
        self.persist(Pending::CONTACTS, ())
    }

    pub fn set_page(&mut self, page: usize) -> Saved<()> {
        self.contacts.set_page(page);
        self.persist(Pending::CONTACTS, ())
    }

    pub fn set_page_size(&mut self, limit: usize) -> Saved<()> {
        self.contacts.set_page_size(limit);
        self.persist(Pending::CONTACTS, ())
    }

    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.contacts.filtered_contacts()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.contacts.total_pages()
    }

    #[must_use]
    pub fn filtered_total_pages(&self) -> usize {
        self.contacts.filtered_total_pages()
    }

    #[must_use]
    pub fn available_tags(&self) -> Vec<String> {
        self.contacts.available_tags()
    }

    // ========================================================================
    // Interactions
    // ========================================================================

    pub fn add_interaction(&mut self, contact_id: &str, draft: InteractionDraft) -> Saved<Interaction> {
        let interaction = self.interactions.add_interaction(contact_id, draft);
        self.persist(Pending::INTERACTIONS, interaction)
    }

    pub fn update_interaction(&mut self, id: &str, draft: InteractionDraft) -> Saved<Option<Interaction>> {
        let updated = self.interactions.update_interaction(id, draft);
        self.persist(Pending::INTERACTIONS, updated)
    }

    pub fn delete_interaction(&mut self, id: &str) -> Saved<Option<Interaction>> {
        let removed = self.interactions.delete_interaction(id);
        self.persist(Pending::INTERACTIONS, removed)
    }

    #[must_use]
    pub fn get_interaction_by_id(&self, id: &str) -> Option<&Interaction> {
        self.interactions.get_interaction_by_id(id)
    }

    #[must_use]
    pub fn get_interactions_by_contact_id(&self, contact_id: &str) -> Vec<&Interaction> {
        self.interactions.get_interactions_by_contact_id(contact_id)
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn load_record<T: DeserializeOwned + Default>(
    backend: &dyn SnapshotBackend,
    record: &str,
    warnings: &mut Vec<TrackerError>,
) -> T {
    let loaded = backend
        .load(record)
        .and_then(|payload| payload.map(|p| snapshot::decode(record, &p)).transpose());
    match loaded {
        Ok(state) => state.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(record, error = %err, "could not load snapshot; starting empty");
            warnings.push(err);
            T::default()
        }
    }
}

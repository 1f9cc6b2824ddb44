//! In-memory contact store with search, tag filtering and paging.
//!
//! Contacts are kept in insertion order; that order is the order of every
//! derived view. Derived views are recomputed on each call.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Duration;

use crate::clock::{Clock, SystemClock};
use crate::model::Contact;
use crate::query::{ContactDraft, ContactFilters};
use crate::util::IdGenerator;

/// Contact collection plus the active filter and page window.
pub struct ContactStore {
    contacts: Vec<Contact>,
    filters: ContactFilters,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl ContactStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::restore(Vec::new(), ContactFilters::default(), clock)
    }

    /// Rebuild a store from previously saved state.
    #[must_use]
    pub fn restore(contacts: Vec<Contact>, filters: ContactFilters, clock: Arc<dyn Clock>) -> Self {
        Self {
            contacts,
            filters,
            ids: IdGenerator::contacts(),
            clock,
        }
    }

    /// Change the page size. Resets to the first page.
    pub fn set_page_size(&mut self, limit: usize) {
        self.filters.limit = limit;
        self.filters.page = 1;
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Append a new contact built from `draft`.
    ///
    /// The draft is taken as-is; field validation belongs to the caller.
    pub fn add_contact(&mut self, draft: ContactDraft) -> Contact {
        let now = self.clock.now();
        let seed = format!("{}|{}", draft.name, draft.email);
        let id = self.ids.generate(&seed, now, self.contacts.len(), |id| {
            self.contacts.iter().any(|c| c.id == id)
        });

        let contact = Contact {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %contact.id, "contact added");
        self.contacts.push(contact.clone());
        contact
    }

    /// Replace every mutable field of contact `id`.
    ///
    /// `updated_at` always moves strictly forward, even when the clock has
    /// stepped back since the previous write (e.g. between two processes).
    /// Returns `None` and changes nothing when no contact matches.
    pub fn update_contact(&mut self, id: &str, draft: ContactDraft) -> Option<Contact> {
        let contact = self.contacts.iter_mut().find(|c| c.id == id)?;
        contact.name = draft.name;
        contact.email = draft.email;
        contact.phone = draft.phone;
        contact.company = draft.company;
        contact.tags = draft.tags;
        let floor = contact.updated_at + Duration::nanoseconds(1);
        contact.updated_at = self.clock.now().max(floor).max(contact.created_at);
        tracing::debug!(id, "contact updated");
        Some(contact.clone())
    }

    /// Remove contact `id`. Interactions are left alone.
    pub fn delete_contact(&mut self, id: &str) -> Option<Contact> {
        let pos = self.contacts.iter().position(|c| c.id == id)?;
        tracing::debug!(id, "contact deleted");
        Some(self.contacts.remove(pos))
    }

    #[must_use]
    pub fn get_contact_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Set the free-text search and go back to the first page.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search = query.into();
        self.filters.page = 1;
    }

    /// Require `tag`. Returns false if it was already required, in which
    /// case nothing changes.
    pub fn set_tag_filter(&mut self, tag: &str) -> bool {
        if self.filters.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.filters.tags.push(tag.to_string());
        self.filters.page = 1;
        true
    }

    /// Stop requiring `tag`. The current page is kept.
    pub fn remove_tag_filter(&mut self, tag: &str) -> bool {
        let before = self.filters.tags.len();
        self.filters.tags.retain(|t| t != tag);
        self.filters.tags.len() != before
    }

    /// Drop search and tag filters and return to the first page.
    pub fn clear_filters(&mut self) {
        self.filters.search.clear();
        self.filters.tags.clear();
        self.filters.page = 1;
    }

    /// Jump to page `page` (1-based). Not bounds-checked.
    pub fn set_page(&mut self, page: usize) {
        self.filters.page = page;
    }

    #[must_use]
    pub fn filters(&self) -> &ContactFilters {
        &self.filters
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Contacts passing the search and tag filters, before paging.
    #[must_use]
    pub fn matching_contacts(&self) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| matches_search(c, &self.filters.search))
            .filter(|c| has_all_tags(c, &self.filters.tags))
            .collect()
    }

    /// The current page of matching contacts.
    ///
    /// Pages past the end, and page 0, are empty.
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        let ContactFilters { page, limit, .. } = self.filters;
        if page == 0 || limit == 0 {
            return Vec::new();
        }
        let start = (page - 1).saturating_mul(limit);
        self.matching_contacts()
            .into_iter()
            .skip(start)
            .take(limit)
            .collect()
    }

    /// Page count over the whole, unfiltered collection.
    ///
    /// This can exceed the number of pages the filtered view actually has;
    /// see `filtered_total_pages`.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        page_count(self.contacts.len(), self.filters.limit)
    }

    /// Page count over the contacts that pass the active filters.
    #[must_use]
    pub fn filtered_total_pages(&self) -> usize {
        page_count(self.matching_contacts().len(), self.filters.limit)
    }

    /// Every tag used by at least one contact, sorted ascending.
    #[must_use]
    pub fn available_tags(&self) -> Vec<String> {
        self.contacts
            .iter()
            .flat_map(|c| c.tags.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// All contacts in insertion order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

/// Name, email and company match case-insensitively; phone matches the raw
/// query as typed.
fn matches_search(contact: &Contact, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    contact.name.to_lowercase().contains(&needle)
        || contact.email.to_lowercase().contains(&needle)
        || contact
            .company
            .as_ref()
            .is_some_and(|c| c.to_lowercase().contains(&needle))
        || contact.phone.as_ref().is_some_and(|p| p.contains(search))
}

fn has_all_tags(contact: &Contact, required: &[String]) -> bool {
    required.iter().all(|tag| contact.has_tag(tag))
}

fn page_count(len: usize, limit: usize) -> usize {
    if limit == 0 { 0 } else { len.div_ceil(limit) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{DateTime, Duration, Utc};
    use std::collections::HashSet;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn manual_store() -> (ContactStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        (ContactStore::new(clock.clone()), clock)
    }

    fn add_numbered(store: &mut ContactStore, count: usize) -> Vec<Contact> {
        (1..=count)
            .map(|i| {
                store.add_contact(ContactDraft::new(
                    format!("Contact {i}"),
                    format!("contact{i}@example.com"),
                ))
            })
            .collect()
    }

    #[test]
    fn test_add_assigns_unique_ids_and_equal_timestamps() {
        let (mut store, _clock) = manual_store();
        let added = add_numbered(&mut store, 25);

        let ids: HashSet<&str> = added.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 25);
        for contact in &added {
            assert_eq!(contact.created_at, contact.updated_at);
            assert!(contact.id.starts_with("ct-"));
        }
        assert_eq!(store.len(), 25);
    }

    #[test]
    fn test_add_identical_drafts_at_same_instant() {
        let (mut store, _clock) = manual_store();
        let a = store.add_contact(ContactDraft::new("Jane", "jane@example.com"));
        let b = store.add_contact(ContactDraft::new("Jane", "jane@example.com"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_replaces_fields_and_bumps_updated_at() {
        let (mut store, clock) = manual_store();
        let original = store.add_contact(
            ContactDraft::new("Jane", "jane@example.com")
                .with_phone("555-0000")
                .with_tags(["lead"]),
        );

        clock.advance(Duration::seconds(30));
        let draft = ContactDraft::new("Jane Doe", "jane.doe@example.com")
            .with_company("Acme")
            .with_tags(["client", "vip"]);
        store.update_contact(&original.id, draft.clone()).unwrap();

        let updated = store.get_contact_by_id(&original.id).unwrap();
        assert_eq!(ContactDraft::from(updated), draft);
        assert_eq!(updated.phone, None);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn test_update_with_system_clock_is_strictly_later() {
        let mut store = ContactStore::default();
        let original = store.add_contact(ContactDraft::new("A", "a@example.com"));
        let updated = store
            .update_contact(&original.id, ContactDraft::new("B", "b@example.com"))
            .unwrap();
        assert!(updated.updated_at > original.updated_at);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_update_after_clock_steps_back_still_moves_forward() {
        let (mut store, clock) = manual_store();
        let original = store.add_contact(ContactDraft::new("Jane", "jane@example.com"));

        clock.advance(Duration::seconds(10));
        let first = store
            .update_contact(&original.id, ContactDraft::new("Jane Doe", "jane@example.com"))
            .unwrap();
        assert_eq!(first.updated_at, start() + Duration::seconds(10));

        clock.set(start() + Duration::seconds(5));
        let second = store
            .update_contact(&original.id, ContactDraft::new("J. Doe", "jane@example.com"))
            .unwrap();
        assert!(second.updated_at > first.updated_at);

        let third = store
            .update_contact(&original.id, ContactDraft::new("Jane", "jane@example.com"))
            .unwrap();
        assert!(third.updated_at > second.updated_at);
        assert_eq!(third.created_at, original.created_at);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut store, _clock) = manual_store();
        let existing = store.add_contact(ContactDraft::new("A", "a@example.com"));
        let result = store.update_contact("ct-nope", ContactDraft::new("X", "x@example.com"));
        assert!(result.is_none());
        assert_eq!(store.contacts(), std::slice::from_ref(&existing));
    }

    #[test]
    fn test_delete_contact() {
        let (mut store, _clock) = manual_store();
        let added = add_numbered(&mut store, 3);

        let removed = store.delete_contact(&added[1].id).unwrap();
        assert_eq!(removed.id, added[1].id);
        assert!(store.get_contact_by_id(&added[1].id).is_none());
        assert_eq!(store.len(), 2);
        // Remaining order is preserved.
        assert_eq!(store.contacts()[0].id, added[0].id);
        assert_eq!(store.contacts()[1].id, added[2].id);

        assert!(store.delete_contact(&added[1].id).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_set_tag_filter_is_idempotent() {
        let (mut store, _clock) = manual_store();
        assert!(store.set_tag_filter("x"));
        store.set_page(3);
        assert!(!store.set_tag_filter("x"));
        assert_eq!(store.filters().tags, vec!["x".to_string()]);
        assert_eq!(store.filters().page, 3);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let (mut store, _clock) = manual_store();
        store.set_page(4);
        store.set_search_query("acme");
        assert_eq!(store.filters().page, 1);

        store.set_page(4);
        store.set_tag_filter("vip");
        assert_eq!(store.filters().page, 1);

        store.set_page(4);
        assert!(store.remove_tag_filter("vip"));
        assert_eq!(store.filters().page, 4);
        assert!(!store.remove_tag_filter("vip"));

        store.set_search_query("acme");
        store.set_tag_filter("client");
        store.set_page(2);
        store.clear_filters();
        assert_eq!(store.filters(), &ContactFilters::default());
    }

    #[test]
    fn test_tag_filter_is_conjunctive() {
        let (mut store, _clock) = manual_store();
        let ab = store.add_contact(ContactDraft::new("AB", "ab@example.com").with_tags(["a", "b"]));

        store.set_tag_filter("a");
        store.set_tag_filter("c");
        assert!(store.filtered_contacts().is_empty());

        store.remove_tag_filter("c");
        assert_eq!(store.filtered_contacts()[0].id, ab.id);

        store.set_tag_filter("b");
        assert_eq!(store.filtered_contacts().len(), 1);
    }

    #[test]
    fn test_search_case_rules() {
        let (mut store, _clock) = manual_store();
        store.add_contact(ContactDraft::new("Jane Doe", "jd@example.com").with_phone("555-1234"));

        store.set_search_query("jane");
        assert_eq!(store.filtered_contacts().len(), 1);

        store.set_search_query("555-12");
        assert_eq!(store.filtered_contacts().len(), 1);

        store.set_search_query("555-1235");
        assert!(store.filtered_contacts().is_empty());
    }

    #[test]
    fn test_search_matches_email_and_company_but_phone_is_case_sensitive() {
        let (mut store, _clock) = manual_store();
        store.add_contact(
            ContactDraft::new("Bob", "bob@example.com")
                .with_company("Initech")
                .with_phone("ext. Ab12"),
        );
        store.add_contact(ContactDraft::new("Carol", "CAROL@Example.org"));

        store.set_search_query("INITECH");
        assert_eq!(store.filtered_contacts()[0].name, "Bob");

        store.set_search_query("carol@example");
        assert_eq!(store.filtered_contacts()[0].name, "Carol");

        store.set_search_query("Ab12");
        assert_eq!(store.filtered_contacts().len(), 1);
        store.set_search_query("AB12");
        assert!(store.filtered_contacts().is_empty());
    }

    #[test]
    fn test_pagination_over_twelve_contacts() {
        let (mut store, _clock) = manual_store();
        let added = add_numbered(&mut store, 12);

        assert_eq!(store.total_pages(), 2);
        let first = store.filtered_contacts();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, added[0].id);

        store.set_page(2);
        let second = store.filtered_contacts();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].id, added[11].id);

        store.set_page(3);
        assert!(store.filtered_contacts().is_empty());
        store.set_page(0);
        assert!(store.filtered_contacts().is_empty());
    }

    #[test]
    fn test_total_pages_ignores_filters() {
        let (mut store, _clock) = manual_store();
        for i in 1..=12 {
            let company = if i <= 3 { "Acme" } else { "Globex" };
            store.add_contact(
                ContactDraft::new(format!("Person {i}"), format!("p{i}@example.com"))
                    .with_company(company),
            );
        }

        store.set_search_query("acme");
        assert_eq!(store.filtered_contacts().len(), 3);
        assert_eq!(store.total_pages(), 2);
        assert_eq!(store.filtered_total_pages(), 1);
        assert_eq!(store.matching_contacts().len(), 3);
    }

    #[test]
    fn test_filter_applies_before_paging() {
        let (mut store, _clock) = manual_store();
        for i in 1..=15 {
            let tags: &[&str] = if i % 2 == 0 { &["even"] } else { &[] };
            store.add_contact(
                ContactDraft::new(format!("N{i}"), format!("n{i}@example.com"))
                    .with_tags(tags.iter().copied()),
            );
        }
        store.set_page_size(5);
        store.set_tag_filter("even");
        store.set_page(2);
        let names: Vec<&str> = store.filtered_contacts().into_iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["N12", "N14"]);
    }

    #[test]
    fn test_available_tags_sorted_and_deduplicated() {
        let (mut store, _clock) = manual_store();
        assert!(store.available_tags().is_empty());
        store.add_contact(ContactDraft::new("A", "a@example.com").with_tags(["vip", "client"]));
        store.add_contact(ContactDraft::new("B", "b@example.com").with_tags(["client", "lead"]));
        store.add_contact(ContactDraft::new("C", "c@example.com"));
        assert_eq!(store.available_tags(), vec!["client", "lead", "vip"]);
    }

    #[test]
    fn test_zero_page_size_yields_nothing() {
        let (mut store, _clock) = manual_store();
        add_numbered(&mut store, 3);
        store.set_page_size(0);
        assert_eq!(store.total_pages(), 0);
        assert!(store.filtered_contacts().is_empty());
    }
}

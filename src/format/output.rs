use contacts_lib::{Contact, Interaction, Tracker};
use serde::{Deserialize, Serialize};

use super::text::tag_color;

/// One page of the filtered contact list, for list/search/page views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    pub page: usize,
    pub limit: usize,
    /// Pages over all contacts, ignoring filters.
    pub total_pages: usize,
    /// Pages over the contacts that pass the filters.
    pub filtered_total_pages: usize,
    /// Contacts passing the filters, across all pages.
    pub matching: usize,
    pub search: String,
    pub tags: Vec<String>,
}

impl ContactPage {
    #[must_use]
    pub fn from_tracker(tracker: &Tracker) -> Self {
        let store = tracker.contacts();
        let filters = store.filters();
        Self {
            contacts: store.filtered_contacts().into_iter().cloned().collect(),
            page: filters.page,
            limit: filters.limit,
            total_pages: store.total_pages(),
            filtered_total_pages: store.filtered_total_pages(),
            matching: store.matching_contacts().len(),
            search: filters.search.clone(),
            tags: filters.tags.clone(),
        }
    }
}

/// Contact with its interaction history (newest first) for show view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(flatten)]
    pub contact: Contact,
    pub interactions: Vec<Interaction>,
}

impl ContactDetails {
    #[must_use]
    pub fn new(contact: &Contact, tracker: &Tracker) -> Self {
        Self {
            contact: contact.clone(),
            interactions: tracker
                .get_interactions_by_contact_id(&contact.id)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

/// A tag in use, with its display colour and how many contacts carry it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagSummary {
    pub tag: String,
    pub color: String,
    pub contacts: usize,
}

impl TagSummary {
    /// Summaries for every tag in use, sorted by tag.
    #[must_use]
    pub fn collect(tracker: &Tracker) -> Vec<Self> {
        let contacts = tracker.contacts().contacts();
        tracker
            .available_tags()
            .into_iter()
            .map(|tag| Self {
                color: tag_color(&tag).to_string(),
                contacts: contacts.iter().filter(|c| c.has_tag(&tag)).count(),
                tag,
            })
            .collect()
    }
}

/// Collection sizes for the stats view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerStats {
    pub contacts: usize,
    pub interactions: usize,
    pub tags: usize,
    /// Contacts passing the current search and tag filters.
    pub matching: usize,
}

impl TrackerStats {
    #[must_use]
    pub fn from_tracker(tracker: &Tracker) -> Self {
        let store = tracker.contacts();
        Self {
            contacts: store.len(),
            interactions: tracker.interactions().len(),
            tags: store.available_tags().len(),
            matching: store.matching_contacts().len(),
        }
    }
}

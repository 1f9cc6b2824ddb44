//! Input payloads and filter state for store operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Contact, InteractionType};

/// Default page size for the contact list.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Mutable fields of a contact, as supplied by a form or command.
///
/// `update_contact` replaces every field with these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub tags: BTreeSet<String>,
}

impl ContactDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Trim text fields, turn blank optionals into `None` and drop blank tags.
    #[must_use]
    pub fn normalized(self) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            company: non_blank(self.company),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            company: contact.company.clone(),
            tags: contact.tags.clone(),
        }
    }
}

/// Mutable fields of an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionDraft {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub content: String,
}

impl InteractionDraft {
    #[must_use]
    pub fn new(kind: InteractionType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Active search, tag filter and page window over the contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFilters {
    /// Free-text search; empty means no search.
    pub search: String,
    /// Required tags; a contact must carry all of them.
    pub tags: Vec<String>,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
}

impl Default for ContactFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            tags: Vec::new(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

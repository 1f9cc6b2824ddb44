//! In-memory interaction store.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::model::Interaction;
use crate::query::InteractionDraft;
use crate::util::IdGenerator;

/// Interaction collection in insertion order.
pub struct InteractionStore {
    interactions: Vec<Interaction>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl InteractionStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::restore(Vec::new(), clock)
    }

    #[must_use]
    pub fn restore(interactions: Vec<Interaction>, clock: Arc<dyn Clock>) -> Self {
        Self {
            interactions,
            ids: IdGenerator::interactions(),
            clock,
        }
    }

    /// Record a new interaction for `contact_id`.
    ///
    /// The contact is not looked up; callers decide whether a dangling
    /// reference is acceptable.
    pub fn add_interaction(&mut self, contact_id: &str, draft: InteractionDraft) -> Interaction {
        let now = self.clock.now();
        let seed = format!("{contact_id}|{}|{}", draft.kind, draft.content);
        let id = self.ids.generate(&seed, now, self.interactions.len(), |id| {
            self.interactions.iter().any(|i| i.id == id)
        });

        let interaction = Interaction {
            id,
            contact_id: contact_id.to_string(),
            kind: draft.kind,
            content: draft.content,
            created_at: now,
        };
        tracing::debug!(id = %interaction.id, contact_id, "interaction added");
        self.interactions.push(interaction.clone());
        interaction
    }

    /// Replace type and content of interaction `id`; `created_at` is kept.
    pub fn update_interaction(&mut self, id: &str, draft: InteractionDraft) -> Option<Interaction> {
        let interaction = self.interactions.iter_mut().find(|i| i.id == id)?;
        interaction.kind = draft.kind;
        interaction.content = draft.content;
        tracing::debug!(id, "interaction updated");
        Some(interaction.clone())
    }

    pub fn delete_interaction(&mut self, id: &str) -> Option<Interaction> {
        let pos = self.interactions.iter().position(|i| i.id == id)?;
        tracing::debug!(id, "interaction deleted");
        Some(self.interactions.remove(pos))
    }

    /// Remove every interaction owned by `contact_id`, returning them in
    /// insertion order.
    pub fn delete_interactions_for_contact(&mut self, contact_id: &str) -> Vec<Interaction> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.interactions)
            .into_iter()
            .partition(|i| i.contact_id == contact_id);
        self.interactions = kept;
        if !removed.is_empty() {
            tracing::debug!(contact_id, count = removed.len(), "interactions deleted");
        }
        removed
    }

    #[must_use]
    pub fn get_interaction_by_id(&self, id: &str) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.id == id)
    }

    /// Interactions for `contact_id`, newest first.
    ///
    /// Equal timestamps keep insertion order.
    #[must_use]
    pub fn get_interactions_by_contact_id(&self, contact_id: &str) -> Vec<&Interaction> {
        let mut results: Vec<&Interaction> = self
            .interactions
            .iter()
            .filter(|i| i.contact_id == contact_id)
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }

    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }
}

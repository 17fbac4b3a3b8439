use crate::models::Lead;
use uuid::Uuid;

/// A lead held by the session, keyed by a session-local stable id.
///
/// The scoring service assigns no identifier, so each arrival gets a random
/// UUID on insertion. Display order remains arrival order.
#[derive(Debug, Clone)]
pub struct StoredLead {
    pub id: Uuid,
    pub lead: Lead,
}

/// Append-only ordered sequence of scored leads.
///
/// Insertion order is arrival order: the startup fetch replaces the contents
/// wholesale, then each successful submission appends at the tail.
#[derive(Debug, Clone, Default)]
pub struct LeadCollection {
    entries: Vec<StoredLead>,
}

impl LeadCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the contents with a fetched list, preserving server order.
    pub fn replace_all(&mut self, leads: Vec<Lead>) {
        self.entries = leads
            .into_iter()
            .map(|lead| StoredLead {
                id: Uuid::new_v4(),
                lead,
            })
            .collect();
    }

    /// Appends a scored lead at the tail and returns its assigned id.
    pub fn push(&mut self, lead: Lead) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(StoredLead { id, lead });
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredLead> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&StoredLead> {
        self.entries.last()
    }

    /// The four display columns for each entry, in order.
    pub fn rows(&self) -> Vec<LeadRow> {
        self.entries.iter().map(|e| LeadRow::new(&e.lead)).collect()
    }
}

/// Display projection of a stored lead: email, the two scores formatted to
/// two decimal places, and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub email: String,
    pub initial_score: String,
    pub reranked_score: String,
    pub comments: String,
}

impl LeadRow {
    pub fn new(lead: &Lead) -> Self {
        Self {
            email: lead.email.clone(),
            initial_score: format_score(lead.initial_score),
            reranked_score: format_score(lead.reranked_score),
            comments: lead.comments.clone(),
        }
    }
}

/// Formats a score to exactly two decimal places.
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeGroup, FamilyBackground};

    fn lead(email: &str, initial: f64, reranked: f64) -> Lead {
        Lead {
            phone_number: "555-1234".to_string(),
            email: email.to_string(),
            credit_score: 700,
            age_group: AgeGroup::From18To25,
            family_background: FamilyBackground::Single,
            income: 50000,
            comments: "test".to_string(),
            consent: true,
            initial_score: initial,
            reranked_score: reranked,
        }
    }

    #[test]
    fn replace_all_preserves_server_order() {
        let mut collection = LeadCollection::new();
        collection.replace_all(vec![
            lead("first@x.com", 0.1, 0.2),
            lead("second@x.com", 0.3, 0.4),
        ]);
        let emails: Vec<_> = collection.iter().map(|e| e.lead.email.as_str()).collect();
        assert_eq!(emails, ["first@x.com", "second@x.com"]);
    }

    #[test]
    fn push_appends_at_tail_with_distinct_ids() {
        let mut collection = LeadCollection::new();
        collection.replace_all(vec![lead("first@x.com", 0.1, 0.2)]);
        let id = collection.push(lead("second@x.com", 0.3, 0.4));
        assert_eq!(collection.len(), 2);
        let tail = collection.last().unwrap();
        assert_eq!(tail.id, id);
        assert_eq!(tail.lead.email, "second@x.com");
        assert_ne!(collection.iter().next().unwrap().id, id);
    }

    #[test]
    fn rows_format_scores_to_two_decimals() {
        let mut collection = LeadCollection::new();
        collection.push(lead("a@b.com", 0.72, 0.81));
        collection.push(lead("c@d.com", 3.0, 0.5));
        let rows = collection.rows();
        assert_eq!(rows[0].initial_score, "0.72");
        assert_eq!(rows[0].reranked_score, "0.81");
        assert_eq!(rows[1].initial_score, "3.00");
        assert_eq!(rows[1].reranked_score, "0.50");
    }

    #[test]
    fn empty_collection_renders_no_rows() {
        let collection = LeadCollection::new();
        assert!(collection.is_empty());
        assert!(collection.rows().is_empty());
    }
}

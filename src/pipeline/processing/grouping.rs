use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{ContactRecord, HouseholdGroup};

static HOUSEHOLD_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*household\s*").expect("household pattern is valid"));

/// Drops every case-insensitive occurrence of "household", even inside a word, along
/// with its surrounding whitespace, then trims.
pub fn normalize_label(label: &str) -> String {
    HOUSEHOLD_WORD.replace_all(label, " ").trim().to_string()
}

/// Household groups in first-seen order, addressable by normalized label.
#[derive(Debug, Clone, Default)]
pub struct Households {
    groups: Vec<HouseholdGroup>,
    by_label: HashMap<String, usize>,
}

impl Households {
    pub fn get(&self, label: &str) -> Option<&HouseholdGroup> {
        self.by_label.get(label).map(|&i| &self.groups[i])
    }

    /// The group a record belongs to.
    pub fn group_of(&self, record: &ContactRecord) -> Option<&HouseholdGroup> {
        self.get(&normalize_label(&record.account_label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HouseholdGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partitions records by normalized account label, keeping first-seen
/// group order and row order within each group.
pub fn group_households(records: &[ContactRecord]) -> Households {
    let mut households = Households::default();
    for record in records {
        let label = normalize_label(&record.account_label);
        let index = match households.by_label.get(&label) {
            Some(&i) => i,
            None => {
                households.groups.push(HouseholdGroup {
                    label: label.clone(),
                    members: Vec::new(),
                });
                households.by_label.insert(label, households.groups.len() - 1);
                households.groups.len() - 1
            }
        };
        households.groups[index].members.push(record.clone());
    }

    debug!(
        "Grouped {} records into {} households ({} joint)",
        records.len(),
        households.len(),
        households.iter().filter(|g| g.is_joint()).count()
    );
    households
}

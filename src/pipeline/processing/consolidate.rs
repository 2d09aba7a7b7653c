use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::constants::COUPLE_JOINER;
use crate::pipeline::processing::grouping::{normalize_label, Households};
use crate::types::{ContactRecord, RecipientEntry};

/// Builds the combined name for a joint household where nobody has an email.
pub trait CoupleNamer: Send + Sync {
    fn couple_name(&self, members: &[&ContactRecord]) -> String;

    fn strategy(&self) -> &'static str;
}

/// `"Alice and Bob Smith"`: first names joined, surname of the first member appended once.
pub struct SharedSurname;

impl CoupleNamer for SharedSurname {
    fn couple_name(&self, members: &[&ContactRecord]) -> String {
        let first_names: Vec<&str> = members.iter().map(|m| m.first_name.as_str()).collect();
        let surname = members.first().map(|m| m.last_name.as_str()).unwrap_or("");
        format!("{} {}", first_names.join(COUPLE_JOINER), surname)
            .trim()
            .to_string()
    }

    fn strategy(&self) -> &'static str {
        "shared_surname"
    }
}

/// `"Alice Smith and Bob Smith"`: each member keeps their own last name.
pub struct SurnamePerName;

impl CoupleNamer for SurnamePerName {
    fn couple_name(&self, members: &[&ContactRecord]) -> String {
        members
            .iter()
            .map(|m| m.full_name())
            .collect::<Vec<_>>()
            .join(COUPLE_JOINER)
    }

    fn strategy(&self) -> &'static str {
        "surname_per_name"
    }
}

pub fn namer_for(surname_per_name: bool) -> Box<dyn CoupleNamer> {
    if surname_per_name {
        Box::new(SurnamePerName)
    } else {
        Box::new(SharedSurname)
    }
}

/// Traversal order: stable by lower-cased account label, then a second
/// stable pass that sinks child rows carrying their own email to the end.
pub fn canonical_order(rows: &[ContactRecord]) -> Vec<&ContactRecord> {
    let mut ordered: Vec<&ContactRecord> = rows.iter().collect();
    ordered.sort_by_key(|r| r.account_label.to_lowercase());
    ordered.sort_by_key(|r| r.is_child_with_email());
    ordered
}

/// Recipient entries keyed by display name, iterated in insertion order.
#[derive(Debug, Default)]
struct RecipientBook {
    entries: Vec<RecipientEntry>,
    by_name: HashMap<String, usize>,
    seen_emails: HashSet<String>,
}

impl RecipientBook {
    fn merge(&mut self, display_name: String, email: &str) {
        match self.by_name.get(&display_name) {
            Some(&i) => {
                self.entries[i].merge_email(email);
            }
            None => {
                self.by_name.insert(display_name.clone(), self.entries.len());
                self.entries.push(RecipientEntry::new(display_name, email));
            }
        }
        if !email.is_empty() {
            self.seen_emails.insert(email.to_string());
        }
    }

    fn has_email(&self, email: &str) -> bool {
        self.seen_emails.contains(email)
    }
}

/// Merges eligible rows into one entry per resolved display name.
pub struct Consolidator {
    namer: Box<dyn CoupleNamer>,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new(Box::new(SharedSurname))
    }
}

impl Consolidator {
    pub fn new(namer: Box<dyn CoupleNamer>) -> Self {
        Self { namer }
    }

    pub fn strategy(&self) -> &'static str {
        self.namer.strategy()
    }

    pub fn consolidate(&self, eligible: &[ContactRecord], households: &Households) -> Vec<RecipientEntry> {
        let mut book = RecipientBook::default();
        let mut couple_names: HashMap<String, String> = HashMap::new();
        let mut suppressed = 0usize;

        for row in canonical_order(eligible) {
            let label = normalize_label(&row.account_label);

            let display_name = if row.is_child_with_email() {
                if book.has_email(&row.email) {
                    debug!("Row {} suppressed: {} already addressed", row.row, row.email);
                    suppressed += 1;
                    continue;
                }
                row.full_name()
            } else if !row.has_email() && self.is_unaddressed_couple(&label, households) {
                couple_names
                    .entry(label.clone())
                    .or_insert_with(|| {
                        let members: Vec<&ContactRecord> = eligible
                            .iter()
                            .filter(|r| normalize_label(&r.account_label) == label)
                            .collect();
                        self.namer.couple_name(&members)
                    })
                    .clone()
            } else if !row.has_email() {
                row.full_name()
            } else {
                label
            };

            book.merge(display_name, &row.email);
        }

        info!(
            "Consolidated {} rows into {} recipients ({} duplicate child emails suppressed, naming={})",
            eligible.len(),
            book.entries.len(),
            suppressed,
            self.namer.strategy()
        );
        book.entries
    }

    fn is_unaddressed_couple(&self, label: &str, households: &Households) -> bool {
        households
            .get(label)
            .map(|g| g.is_joint() && g.all_blank())
            .unwrap_or(false)
    }
}

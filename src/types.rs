use serde::{Deserialize, Serialize};

use crate::constants::{EMAIL_SEPARATOR, JOINT_MARKER, OUTPUT_HEADER};

/// One input row. Identity is positional: `row` is the 1-based data line
/// the record came from, header excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub row: usize,
    pub account_label: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ContactRecord {
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// `"First Last"`, trimmed so a missing last name leaves no trailing space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Case-insensitive test of whether the account label names this person.
    pub fn named_in_label(&self) -> bool {
        self.account_label
            .to_lowercase()
            .contains(&self.first_name.to_lowercase())
    }

    /// A row carrying its own address for someone the account label does not name.
    pub fn is_child_with_email(&self) -> bool {
        self.has_email() && !self.named_in_label()
    }
}

/// All contact records sharing a normalized account label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdGroup {
    pub label: String,
    pub members: Vec<ContactRecord>,
}

impl HouseholdGroup {
    pub fn is_joint(&self) -> bool {
        self.label.contains(JOINT_MARKER)
    }

    pub fn all_blank(&self) -> bool {
        self.members.iter().all(|m| !m.has_email())
    }
}

/// A merged, named unit keyed by `display_name`; becomes one output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientEntry {
    pub display_name: String,
    /// Non-empty, unique addresses in first-seen order.
    pub emails: Vec<String>,
}

impl RecipientEntry {
    pub fn new(display_name: impl Into<String>, email: &str) -> Self {
        let mut entry = Self {
            display_name: display_name.into(),
            emails: Vec::new(),
        };
        entry.merge_email(email);
        entry
    }

    /// Appends `email` unless it is blank or already present. Returns whether it was added.
    pub fn merge_email(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || self.contains_email(email) {
            return false;
        }
        self.emails.push(email.to_string());
        true
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    pub fn has_email(&self) -> bool {
        !self.emails.is_empty()
    }

    pub fn joined_emails(&self) -> String {
        self.emails.join(EMAIL_SEPARATOR)
    }
}

/// A recipient after short-name normalization, with its collision counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecipient {
    /// The externally visible name, never suffixed.
    pub name: String,
    /// Occurrence number for the second and later holders of the same name.
    pub collision: Option<usize>,
    pub emails: Vec<String>,
}

impl ResolvedRecipient {
    /// Unique internal key: the name plus its `" (n)"` suffix when it collided.
    pub fn key(&self) -> String {
        match self.collision {
            Some(n) => format!("{} ({})", self.name, n),
            None => self.name.clone(),
        }
    }

    pub fn has_email(&self) -> bool {
        !self.emails.is_empty()
    }

    pub fn joined_emails(&self) -> String {
        self.emails.join(EMAIL_SEPARATOR)
    }
}

/// Constant fields broadcast to every output row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeFields {
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub send_as: String,
    pub attachment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub known_as: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub send_as: String,
    pub attachment: String,
}

impl OutputRow {
    pub fn to_record(&self) -> [&str; 7] {
        [
            self.known_as.as_str(),
            self.to.as_str(),
            self.cc.as_str(),
            self.bcc.as_str(),
            self.subject.as_str(),
            self.send_as.as_str(),
            self.attachment.as_str(),
        ]
    }
}

/// The emitted table. The header row is implied by [`OUTPUT_HEADER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeTable {
    pub rows: Vec<OutputRow>,
}

impl MergeTable {
    pub fn header(&self) -> [&'static str; 7] {
        OUTPUT_HEADER
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(label: &str, first: &str, last: &str, email: &str) -> ContactRecord {
        ContactRecord {
            row: 1,
            account_label: label.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_child_with_email_detection() {
        assert!(contact("Smith Household", "Tim", "Smith", "t@x.com").is_child_with_email());
        assert!(!contact("John Smith Household", "john", "Smith", "j@x.com").is_child_with_email());
        assert!(!contact("Smith Household", "Tim", "Smith", "  ").is_child_with_email());
    }

    #[test]
    fn test_merge_email_skips_blank_and_duplicates() {
        let mut entry = RecipientEntry::new("John", "");
        assert!(!entry.has_email());
        assert!(entry.merge_email("a@x.com"));
        assert!(!entry.merge_email("a@x.com"));
        assert!(!entry.merge_email("   "));
        assert!(entry.merge_email("b@x.com"));
        assert_eq!(entry.joined_emails(), "a@x.com;b@x.com");
    }

    #[test]
    fn test_resolved_key_carries_suffix() {
        let mut r = ResolvedRecipient {
            name: "John".to_string(),
            collision: None,
            emails: vec![],
        };
        assert_eq!(r.key(), "John");
        r.collision = Some(2);
        assert_eq!(r.key(), "John (2)");
        assert_eq!(r.name, "John");
    }

    #[test]
    fn test_full_name_without_last_name() {
        assert_eq!(contact("Cher Household", "Cher", "", "").full_name(), "Cher");
    }
}

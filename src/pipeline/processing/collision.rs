use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::types::{RecipientEntry, ResolvedRecipient};

/// Drops the final whitespace-delimited token from a multi-token name
/// when the entry has a resolved email. Other names pass through.
pub fn short_name(display_name: &str, has_email: bool) -> String {
    if !has_email {
        return display_name.to_string();
    }
    let trimmed = display_name.trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(idx) => trimmed[..idx].trim_end().to_string(),
        None => display_name.to_string(),
    }
}

/// Shortens names and numbers repeat occurrences so every entry keeps a
/// unique key. The first holder of a name is never suffixed.
pub fn resolve_collisions(entries: Vec<RecipientEntry>) -> Vec<ResolvedRecipient> {
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut keys: HashSet<String> = HashSet::new();
    let mut resolved = Vec::with_capacity(entries.len());
    let mut collisions = 0usize;

    for entry in entries {
        let name = short_name(&entry.display_name, entry.has_email());
        let count = occurrences.entry(name.clone()).or_insert(0);
        *count += 1;

        let mut recipient = ResolvedRecipient {
            name,
            collision: None,
            emails: entry.emails,
        };
        if *count > 1 {
            recipient.collision = Some(*count);
        }
        // A suffixed key can still meet a literal name such as "John (2)".
        while keys.contains(&recipient.key()) {
            let n = recipient.collision.map_or(2, |n| n + 1);
            recipient.collision = Some(n);
        }
        if let Some(n) = recipient.collision {
            debug!("Name collision: {:?} tracked as {:?}", recipient.name, recipient.key());
            collisions += 1;
            *count = n;
        }
        keys.insert(recipient.key());
        resolved.push(recipient);
    }

    info!("Resolved {} recipients ({} name collisions)", resolved.len(), collisions);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, emails: &[&str]) -> RecipientEntry {
        RecipientEntry {
            display_name: name.to_string(),
            emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_short_name_rules() {
        assert_eq!(short_name("John Smith", true), "John");
        assert_eq!(short_name("John & Jane Smith", true), "John & Jane");
        assert_eq!(short_name("John Smith", false), "John Smith");
        assert_eq!(short_name("Cher", true), "Cher");
        assert_eq!(short_name("", true), "");
    }

    #[test]
    fn test_second_occurrence_suffixed() {
        let resolved = resolve_collisions(vec![
            entry("John Smith", &["js@x.com"]),
            entry("John Doe", &["jd@x.com"]),
            entry("John Roe", &["jr@x.com"]),
        ]);
        let keys: Vec<_> = resolved.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["John", "John (2)", "John (3)"]);
        assert!(resolved.iter().all(|r| r.name == "John"));
        assert_eq!(resolved[1].emails, vec!["jd@x.com"]);
    }

    #[test]
    fn test_collision_is_case_sensitive() {
        let resolved = resolve_collisions(vec![entry("John A", &["a@x.com"]), entry("john B", &["b@x.com"])]);
        assert!(resolved.iter().all(|r| r.collision.is_none()));
    }

    #[test]
    fn test_blank_email_names_keep_their_surname() {
        let resolved = resolve_collisions(vec![entry("John Smith", &[]), entry("John Doe", &["jd@x.com"])]);
        assert_eq!(resolved[0].key(), "John Smith");
        assert_eq!(resolved[1].key(), "John");
    }

    #[test]
    fn test_suffix_skips_literal_name() {
        let resolved = resolve_collisions(vec![
            entry("John (2)", &[]),
            entry("John Smith", &["a@x.com"]),
            entry("John Doe", &["b@x.com"]),
        ]);
        let keys: Vec<_> = resolved.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["John (2)", "John", "John (3)"]);
    }
}

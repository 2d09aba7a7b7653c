use serde::Serialize;
use tracing::debug;

use crate::pipeline::processing::grouping::Households;
use crate::types::{ContactRecord, HouseholdGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Eligibility {
    Keep,
    /// Blank email and the account label does not name them.
    ChildWithoutEmail,
    /// Blank email in a joint household where another member has one.
    UnaddressedSpouse,
}

impl Eligibility {
    pub fn is_kept(self) -> bool {
        self == Eligibility::Keep
    }
}

pub fn assess(record: &ContactRecord, group: &HouseholdGroup) -> Eligibility {
    if record.has_email() {
        return Eligibility::Keep;
    }
    if !record.named_in_label() {
        return Eligibility::ChildWithoutEmail;
    }
    if group.is_joint() && !group.all_blank() {
        return Eligibility::UnaddressedSpouse;
    }
    Eligibility::Keep
}

/// Outcome of filtering, in the same relative order as the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredContacts {
    pub eligible: Vec<ContactRecord>,
    pub children_dropped: usize,
    pub spouses_dropped: usize,
}

impl FilteredContacts {
    pub fn dropped(&self) -> usize {
        self.children_dropped + self.spouses_dropped
    }
}

pub fn filter_eligible(records: &[ContactRecord], households: &Households) -> FilteredContacts {
    let mut out = FilteredContacts::default();
    for record in records {
        // Every record was grouped, so a missing group cannot occur; keep the row if it does.
        let decision = households
            .group_of(record)
            .map(|group| assess(record, group))
            .unwrap_or(Eligibility::Keep);
        if decision.is_kept() {
            out.eligible.push(record.clone());
            continue;
        }
        match decision {
            Eligibility::Keep => {}
            Eligibility::ChildWithoutEmail => {
                debug!("Row {} dropped: child without email", record.row);
                out.children_dropped += 1;
            }
            Eligibility::UnaddressedSpouse => {
                debug!("Row {} dropped: joint member without email", record.row);
                out.spouses_dropped += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::grouping::group_households;

    fn contact(row: usize, label: &str, first: &str, email: &str) -> ContactRecord {
        ContactRecord {
            row,
            account_label: label.to_string(),
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            email: email.to_string(),
        }
    }

    fn run(records: &[ContactRecord]) -> FilteredContacts {
        filter_eligible(records, &group_households(records))
    }

    #[test]
    fn test_child_without_email_is_dropped() {
        let records = vec![
            contact(1, "John Smith Household", "John", "j@x.com"),
            contact(2, "John Smith Household", "Tim", ""),
        ];
        let out = run(&records);
        assert_eq!(out.eligible.len(), 1);
        assert_eq!(out.children_dropped, 1);
    }

    #[test]
    fn test_child_with_email_is_kept() {
        let records = vec![contact(1, "John Smith Household", "Tim", "t@x.com")];
        assert_eq!(run(&records).eligible.len(), 1);
    }

    #[test]
    fn test_joint_household_all_blank_keeps_everyone() {
        let records = vec![
            contact(1, "Al & Bo Smith Household", "Al", ""),
            contact(2, "Al & Bo Smith Household", "Bo", ""),
        ];
        let out = run(&records);
        assert_eq!(out.eligible.len(), 2);
        assert_eq!(out.dropped(), 0);
    }

    #[test]
    fn test_joint_household_drops_blank_member_when_other_has_email() {
        let records = vec![
            contact(1, "Al & Bo Smith Household", "Al", ""),
            contact(2, "Al & Bo Smith Household", "Bo", "bo@x.com"),
        ];
        let out = run(&records);
        assert_eq!(out.eligible.iter().map(|r| r.row).collect::<Vec<_>>(), vec![2]);
        assert_eq!(out.spouses_dropped, 1);
    }

    #[test]
    fn test_single_household_blank_named_member_is_kept() {
        let records = vec![
            contact(1, "John Smith Household", "John", ""),
            contact(2, "John Smith Household", "Mary", "m@x.com"),
        ];
        let out = run(&records);
        assert_eq!(out.eligible.iter().map(|r| r.row).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_order_follows_input_not_groups() {
        let records = vec![
            contact(1, "Al Household", "Al", "a@x.com"),
            contact(2, "Bo Household", "Bo", "b@x.com"),
            contact(3, "Al Household", "Al", "a2@x.com"),
        ];
        let rows: Vec<_> = run(&records).eligible.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2, 3]);
    }
}

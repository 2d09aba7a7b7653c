use serde::Serialize;
use tracing::{debug, info};

use crate::codec::{read_table, RawTable};
use crate::constants::{ACCOUNT_NAME_COLUMN, EMAIL_COLUMN, FIRST_NAME_ALIASES, LAST_NAME_ALIASES};
use crate::error::{MergeError, Result};
use crate::types::ContactRecord;

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub account_name: usize,
    pub first_name: usize,
    pub last_name: usize,
    pub email: usize,
}

impl ColumnMap {
    /// Locates every required column, reporting all missing ones at once.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == name))
        };

        let account_name = find(&[ACCOUNT_NAME_COLUMN]);
        let first_name = find(FIRST_NAME_ALIASES);
        let last_name = find(LAST_NAME_ALIASES);
        let email = find(&[EMAIL_COLUMN]);

        match (account_name, first_name, last_name, email) {
            (Some(account_name), Some(first_name), Some(last_name), Some(email)) => Ok(Self {
                account_name,
                first_name,
                last_name,
                email,
            }),
            _ => {
                let mut columns = Vec::new();
                if account_name.is_none() {
                    columns.push(ACCOUNT_NAME_COLUMN.to_string());
                }
                if first_name.is_none() {
                    columns.push(FIRST_NAME_ALIASES[0].to_string());
                }
                if last_name.is_none() {
                    columns.push(LAST_NAME_ALIASES[0].to_string());
                }
                if email.is_none() {
                    columns.push(EMAIL_COLUMN.to_string());
                }
                Err(MergeError::MissingColumn { columns })
            }
        }
    }

    /// Minimum number of fields a row needs to reach every required column.
    pub fn width(&self) -> usize {
        self.account_name
            .max(self.first_name)
            .max(self.last_name)
            .max(self.email)
            + 1
    }

    fn extract(&self, row: usize, fields: &[String]) -> Option<ContactRecord> {
        if fields.len() < self.width() {
            return None;
        }
        Some(ContactRecord {
            row,
            account_label: fields[self.account_name].trim().to_string(),
            first_name: fields[self.first_name].trim().to_string(),
            last_name: fields[self.last_name].trim().to_string(),
            email: fields[self.email].trim().to_string(),
        })
    }
}

/// Records in input order plus the count of rows skipped for being too short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContacts {
    pub columns: ColumnMap,
    pub records: Vec<ContactRecord>,
    pub short_rows: usize,
}

/// Turns raw tabular text into contact records keyed by the required columns.
pub fn parse_contacts(input: &[u8]) -> Result<ParsedContacts> {
    let RawTable { headers, rows } = read_table(input)?;
    let columns = ColumnMap::resolve(&headers)?;
    debug!("Resolved columns: {:?}", columns);

    let total = rows.len();
    let mut records = Vec::with_capacity(total);
    let mut short_rows = 0;
    for (row, fields) in &rows {
        match columns.extract(*row, fields) {
            Some(record) => records.push(record),
            None => {
                debug!("Skipping row {}: {} of {} fields", row, fields.len(), columns.width());
                short_rows += 1;
            }
        }
    }

    info!("Parsed {} contact records ({} short rows skipped)", records.len(), short_rows);
    Ok(ParsedContacts {
        columns,
        records,
        short_rows,
    })
}

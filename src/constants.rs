/// Column and header names shared by the reader and the emitter.
/// Input headers are matched exactly and case-sensitively.

// Required input columns
pub const ACCOUNT_NAME_COLUMN: &str = "Account Name";
pub const EMAIL_COLUMN: &str = "Email";

/// Accepted spellings for the first-name column, in lookup order.
pub const FIRST_NAME_ALIASES: &[&str] = &["First Name", "First"];

/// Accepted spellings for the last-name column, in lookup order.
pub const LAST_NAME_ALIASES: &[&str] = &["Last Name", "Last"];

/// Header row of the emitted mail-merge table.
pub const OUTPUT_HEADER: [&str; 7] = [
    "Known As",
    "To",
    "CC",
    "BCC",
    "Subject",
    "Send As",
    "Attachment1",
];

/// Separator used when merging several addresses into one `To` cell.
pub const EMAIL_SEPARATOR: &str = ";";

/// Joins spouse first names in a combined household name.
pub const COUPLE_JOINER: &str = " and ";

/// Marker for a joint household label.
pub const JOINT_MARKER: char = '&';

// Defaults for the command line and config file
pub const DEFAULT_OUTPUT_FILE: &str = "processed_data.csv";
pub const DEFAULT_CONFIG_FILE: &str = "household_merge.toml";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

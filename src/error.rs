use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Missing required column(s): {}", columns.join(", "))]
    MissingColumn { columns: Vec<String> },

    #[error("Input table is empty")]
    EmptyInput,

    #[error("Malformed row at line {index}")]
    MalformedRow { index: usize },

    #[error("Input is {size} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Invalid email address in {field}: {value:?}")]
    InvalidAddress { field: String, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MergeError {
    /// Structural errors abort the run before any row is processed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MergeError::MissingColumn { .. } | MergeError::EmptyInput | MergeError::MalformedRow { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;

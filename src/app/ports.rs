use async_trait::async_trait;

use crate::error::Result;

/// Supplies the raw contact table for one run.
#[async_trait]
pub trait ContactSourcePort: Send + Sync {
    async fn read_contacts(&self) -> Result<Vec<u8>>;

    fn describe(&self) -> String;
}

/// Receives the encoded mail-merge table once the run has succeeded.
#[async_trait]
pub trait MergeSinkPort: Send + Sync {
    async fn write_merge_table(&self, encoded: &str) -> Result<()>;

    fn describe(&self) -> String;
}

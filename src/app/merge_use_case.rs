use std::sync::Arc;

use tracing::{debug, error, info};

use crate::app::ports::{ContactSourcePort, MergeSinkPort};
use crate::codec::write_table;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineResult};

/// Use case for turning one contact export into one mail-merge table
pub struct MergeUseCase {
    pipeline: Pipeline,
    source: Box<dyn ContactSourcePort>,
    sink: Arc<dyn MergeSinkPort>,
}

impl MergeUseCase {
    pub fn new(pipeline: Pipeline, source: Box<dyn ContactSourcePort>, sink: Arc<dyn MergeSinkPort>) -> Self {
        Self {
            pipeline,
            source,
            sink,
        }
    }

    /// Reads the source, runs the pipeline and writes the encoded table.
    /// The sink is only touched after every stage has succeeded.
    pub async fn execute(&self) -> Result<PipelineResult> {
        info!("📥 Reading contacts from {}", self.source.describe());
        let input = self.source.read_contacts().await?;
        debug!("Read {} bytes", input.len());

        let result = match self.pipeline.run(&input) {
            Ok(result) => result,
            Err(e) => {
                error!("Merge failed: {}", e);
                return Err(e);
            }
        };
        info!("Input digest {}", result.stats.input_digest);

        let encoded = write_table(&result.table)?;
        self.sink.write_merge_table(&encoded).await?;
        info!("💾 Wrote {} recipients to {}", result.table.len(), self.sink.describe());

        Ok(result)
    }
}

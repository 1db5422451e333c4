use crate::core::Pipeline;
use crate::domain::model::BatchSummary;
use crate::utils::error::Result;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchSummary> {
        tracing::info!("Starting batch dose calculation");

        // Extract
        let requests = self.pipeline.extract()?;
        tracing::info!("Read {} rows", requests.len());

        // Transform
        let records = self.pipeline.transform(requests)?;
        let valid = records.iter().filter(|r| r.is_valid()).count();
        let invalid = records.len() - valid;
        if invalid > 0 {
            tracing::warn!("{} rows have an invalid weight", invalid);
        }

        // Load
        let output_path = self.pipeline.load(&records)?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(BatchSummary {
            total: records.len(),
            valid,
            invalid,
            output_path,
        })
    }
}

use crate::core::{Pipeline, Report};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行三個階段，任何一步失敗即中止
    pub async fn run(&self) -> Result<Report> {
        let started = Instant::now();
        tracing::info!("Starting report pipeline");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} sales records", records.len());

        // Transform
        let report = self.pipeline.transform(records).await?;
        tracing::info!("Aggregated into {} categories", report.len());

        // Load
        let report = self.pipeline.load(report).await?;
        tracing::info!(
            "Report persisted and read back ({} categories) in {:?}",
            report.len(),
            started.elapsed()
        );

        Ok(report)
    }
}

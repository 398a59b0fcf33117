use crate::core::{Calculation, CalculationMode, CalculationRequest, Calculator, calculate};
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// Runs the calculation engine in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

#[async_trait]
impl Calculator for LocalProvider {
    async fn calculate(
        &self,
        mode: CalculationMode,
        request: &CalculationRequest,
    ) -> Result<Calculation> {
        debug!("Calculating {} locally for {:?}", mode, request);
        Ok(calculate(mode, request)?)
    }
}

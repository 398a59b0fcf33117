//! The seam between presenters and whatever performs the calculation.

use crate::core::input::CalculationRequest;
use crate::core::mode::{Calculation, CalculationMode};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Calculator: Send + Sync {
    async fn calculate(
        &self,
        mode: CalculationMode,
        request: &CalculationRequest,
    ) -> Result<Calculation>;
}

//! Calculation engine and shared application plumbing

pub mod calculator;
pub mod config;
pub mod emi;
pub mod error;
pub mod input;
pub mod log;
pub mod mode;
pub mod rounding;
pub mod schedule;
pub mod sip;

// Re-export main types for cleaner imports
pub use calculator::Calculator;
pub use emi::{AmortizationRow, EmiInput, EmiResult, amortization_schedule, compute_emi};
pub use error::ValidationError;
pub use input::{CalculationRequest, RawRequest, RawValue};
pub use mode::{Calculation, CalculationMode, MODES, ModeSpec, calculate, calculate_raw};
pub use sip::{SipInput, SipResult, SipYearRow, compute_sip, sip_growth_schedule};

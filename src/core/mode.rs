//! Calculation modes and the table that routes a request to its formula.
//!
//! Every mode-specific detail (field naming, endpoint, labels, formula) lives
//! in a [`ModeSpec`] entry; callers look the entry up instead of branching on
//! the mode themselves.

use crate::core::emi::{EMI_FIELDS, EmiInput, EmiResult, compute_emi};
use crate::core::error::ValidationError;
use crate::core::input::{CalculationRequest, FieldNames, RawRequest};
use crate::core::rounding::round_currency;
use crate::core::sip::{SIP_FIELDS, SipInput, SipResult, compute_sip};
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    Sip,
    Emi,
}

/// Table entry describing one calculation mode.
pub struct ModeSpec {
    pub mode: CalculationMode,
    /// Caller-facing field names; `fields.amount` differs per mode.
    pub fields: FieldNames,
    pub endpoint: &'static str,
    pub label: &'static str,
    pub amount_label: &'static str,
    compute: fn(&CalculationRequest) -> Result<Calculation, ValidationError>,
}

impl ModeSpec {
    /// Keys the amount may arrive under, most specific first.
    pub fn amount_keys(&self) -> [&'static str; 2] {
        [self.fields.amount, "amount"]
    }

    pub fn compute(&self, request: &CalculationRequest) -> Result<Calculation, ValidationError> {
        (self.compute)(request)
    }
}

static SIP_SPEC: ModeSpec = ModeSpec {
    mode: CalculationMode::Sip,
    fields: SIP_FIELDS,
    endpoint: "/calculate-sip",
    label: "SIP Investor",
    amount_label: "Monthly Investment",
    compute: sip_from_request,
};

static EMI_SPEC: ModeSpec = ModeSpec {
    mode: CalculationMode::Emi,
    fields: EMI_FIELDS,
    endpoint: "/calculate-emi",
    label: "EMI Loan",
    amount_label: "Loan Amount",
    compute: emi_from_request,
};

fn sip_from_request(request: &CalculationRequest) -> Result<Calculation, ValidationError> {
    let input = SipInput::new(request.amount, request.rate, request.years)?;
    compute_sip(&input).map(Calculation::Sip)
}

fn emi_from_request(request: &CalculationRequest) -> Result<Calculation, ValidationError> {
    let input = EmiInput::new(request.amount, request.rate, request.years)?;
    compute_emi(&input).map(Calculation::Emi)
}

/// All supported modes, in display order.
pub static MODES: [&ModeSpec; 2] = [&SIP_SPEC, &EMI_SPEC];

impl CalculationMode {
    pub fn spec(self) -> &'static ModeSpec {
        match self {
            CalculationMode::Sip => &SIP_SPEC,
            CalculationMode::Emi => &EMI_SPEC,
        }
    }
}

impl Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CalculationMode::Sip => "sip",
                CalculationMode::Emi => "emi",
            }
        )
    }
}

impl FromStr for CalculationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODES
            .iter()
            .map(|spec| spec.mode)
            .find(|mode| mode.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("Unknown calculation mode: {}", s))
    }
}

/// Result of any calculation; serializes as the mode's response record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Calculation {
    Sip(SipResult),
    Emi(EmiResult),
}

/// One displayable output value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultField {
    pub label: &'static str,
    pub key: &'static str,
    pub value: f64,
    pub highlight: bool,
}

impl Calculation {
    pub fn mode(&self) -> CalculationMode {
        match self {
            Calculation::Sip(_) => CalculationMode::Sip,
            Calculation::Emi(_) => CalculationMode::Emi,
        }
    }

    /// Output values in the order a presenter shows them.
    pub fn fields(&self) -> [ResultField; 3] {
        match self {
            Calculation::Sip(r) => [
                field("Invested", "investedAmount", r.invested_amount, false),
                field("Returns", "estimatedReturns", r.estimated_returns, false),
                field("Total Value", "totalValue", r.total_value, true),
            ],
            Calculation::Emi(r) => [
                field("Monthly EMI", "emi", r.emi, true),
                field("Total Interest", "totalInterest", r.total_interest, false),
                field("Total Payable", "totalAmount", r.total_amount, false),
            ],
        }
    }

    /// Copy with every value rounded to `decimal_places`.
    pub fn rounded(&self, decimal_places: u32) -> Self {
        let round = |value| round_currency(value, decimal_places);
        match self {
            Calculation::Sip(r) => Calculation::Sip(SipResult {
                invested_amount: round(r.invested_amount),
                estimated_returns: round(r.estimated_returns),
                total_value: round(r.total_value),
            }),
            Calculation::Emi(r) => Calculation::Emi(EmiResult {
                emi: round(r.emi),
                total_interest: round(r.total_interest),
                total_amount: round(r.total_amount),
            }),
        }
    }

    /// Decodes a backend response body for `mode`.
    pub fn from_json(mode: CalculationMode, value: serde_json::Value) -> anyhow::Result<Self> {
        let calculation = match mode {
            CalculationMode::Sip => serde_json::from_value(value).map(Calculation::Sip),
            CalculationMode::Emi => serde_json::from_value(value).map(Calculation::Emi),
        };
        calculation.with_context(|| format!("Response is not a valid {mode} result"))
    }
}

fn field(label: &'static str, key: &'static str, value: f64, highlight: bool) -> ResultField {
    ResultField {
        label,
        key,
        value,
        highlight,
    }
}

pub fn calculate(
    mode: CalculationMode,
    request: &CalculationRequest,
) -> Result<Calculation, ValidationError> {
    mode.spec().compute(request)
}

/// Parses raw fields using the mode's field names, then calculates.
pub fn calculate_raw(mode: CalculationMode, raw: &RawRequest) -> Result<Calculation, ValidationError> {
    let spec = mode.spec();
    let request = raw.parse(spec.fields)?;
    spec.compute(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_parsing_and_display() {
        assert_eq!("sip".parse::<CalculationMode>().unwrap(), CalculationMode::Sip);
        assert_eq!(" EMI ".parse::<CalculationMode>().unwrap(), CalculationMode::Emi);
        assert!("fd".parse::<CalculationMode>().is_err());
        assert_eq!(CalculationMode::Sip.to_string(), "sip");
        assert_eq!(
            serde_json::to_value(CalculationMode::Emi).unwrap(),
            json!("emi")
        );
    }

    #[test]
    fn test_table_entries_match_their_modes() {
        for spec in MODES {
            assert_eq!(spec.mode.spec().endpoint, spec.endpoint);
            assert_eq!(spec.amount_keys(), [spec.fields.amount, "amount"]);
        }
        assert_eq!(CalculationMode::Sip.spec().fields.amount, "monthlyInvestment");
        assert_eq!(CalculationMode::Emi.spec().fields.amount, "loanAmount");
        assert_eq!(CalculationMode::Sip.spec().endpoint, "/calculate-sip");
        assert_eq!(CalculationMode::Emi.spec().endpoint, "/calculate-emi");
    }

    #[test]
    fn test_dispatch_routes_to_formula() {
        let request = CalculationRequest::new(12000.0, 0.0, 1.0);

        let sip = calculate(CalculationMode::Sip, &request).unwrap();
        assert_eq!(sip.mode(), CalculationMode::Sip);
        assert_eq!(sip.fields()[0].value, 144000.0);

        let emi = calculate(CalculationMode::Emi, &request).unwrap();
        assert_eq!(emi.mode(), CalculationMode::Emi);
        assert_eq!(emi.fields()[0].value, 1000.0);
    }

    #[test]
    fn test_dispatch_renames_amount_field_in_errors() {
        let request = CalculationRequest::new(-1.0, 5.0, 1.0);
        assert_eq!(
            calculate(CalculationMode::Sip, &request).unwrap_err().field(),
            "monthlyInvestment"
        );
        assert_eq!(
            calculate(CalculationMode::Emi, &request).unwrap_err().field(),
            "loanAmount"
        );

        let raw = RawRequest {
            amount: None,
            rate: Some(1.0.into()),
            years: Some(1.0.into()),
        };
        assert_eq!(
            calculate_raw(CalculationMode::Emi, &raw),
            Err(ValidationError::Missing {
                field: "loanAmount"
            })
        );
    }

    #[test]
    fn test_serializes_as_mode_record() {
        let sip = calculate(CalculationMode::Sip, &CalculationRequest::new(1000.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            serde_json::to_value(sip).unwrap(),
            json!({"investedAmount": 12000.0, "estimatedReturns": 0.0, "totalValue": 12000.0})
        );

        let emi = calculate(CalculationMode::Emi, &CalculationRequest::new(12000.0, 0.0, 1.0)).unwrap();
        assert_eq!(
            serde_json::to_value(emi).unwrap(),
            json!({"emi": 1000.0, "totalInterest": 0.0, "totalAmount": 12000.0})
        );
    }

    #[test]
    fn test_rounded_and_decoded() {
        let emi = calculate(CalculationMode::Emi, &CalculationRequest::new(500000.0, 10.0, 5.0))
            .unwrap()
            .rounded(2);
        let Calculation::Emi(result) = emi else {
            panic!("Expected an EMI result");
        };
        assert_eq!(result.emi, 10623.52);

        let decoded = Calculation::from_json(
            CalculationMode::Emi,
            json!({"emi": 10623.52, "totalInterest": 137411.34, "totalAmount": 637411.34}),
        )
        .unwrap();
        assert_eq!(decoded.fields()[2].value, 637411.34);

        assert!(Calculation::from_json(CalculationMode::Sip, json!({"emi": 1.0})).is_err());
    }
}

//! Future value of a systematic investment plan (fixed monthly contribution,
//! compounded monthly, contributions at the start of each month).

use crate::core::error::{ValidationError, require_non_negative, require_positive};
use crate::core::input::FieldNames;
use crate::core::schedule::{month_marks, monthly_rate};
use serde::{Deserialize, Serialize};

pub const SIP_FIELDS: FieldNames = FieldNames {
    amount: "monthlyInvestment",
    rate: "annualRate",
    years: "years",
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipInput {
    monthly_investment: f64,
    annual_rate_percent: f64,
    years: f64,
}

impl SipInput {
    pub fn new(
        monthly_investment: f64,
        annual_rate_percent: f64,
        years: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            monthly_investment: require_positive(SIP_FIELDS.amount, monthly_investment)?,
            annual_rate_percent: require_non_negative(SIP_FIELDS.rate, annual_rate_percent)?,
            years: require_positive(SIP_FIELDS.years, years)?,
        })
    }

    pub fn monthly_investment(&self) -> f64 {
        self.monthly_investment
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    /// Number of monthly contributions; fractional for fractional years.
    pub fn months(&self) -> f64 {
        self.years * 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

/// Value of the plan at the end of a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYearRow {
    pub year: u32,
    /// Months elapsed at the end of this row.
    pub months: f64,
    pub invested_amount: f64,
    pub estimated_returns: f64,
    pub total_value: f64,
}

pub fn compute_sip(input: &SipInput) -> Result<SipResult, ValidationError> {
    value_after(input, input.months())
}

/// Year-by-year growth; the last row matches [`compute_sip`].
pub fn sip_growth_schedule(input: &SipInput) -> Result<Vec<SipYearRow>, ValidationError> {
    let total = compute_sip(input)?;
    let marks = month_marks(input.months(), 12.0, SIP_FIELDS.years)?;
    let last = marks.len();

    marks
        .into_iter()
        .enumerate()
        .map(|(index, months)| {
            let result = if index + 1 == last {
                total
            } else {
                value_after(input, months)?
            };
            Ok(SipYearRow {
                year: index as u32 + 1,
                months,
                invested_amount: result.invested_amount,
                estimated_returns: result.estimated_returns,
                total_value: result.total_value,
            })
        })
        .collect()
}

fn value_after(input: &SipInput, months: f64) -> Result<SipResult, ValidationError> {
    let i = monthly_rate(input.annual_rate_percent);
    let invested_amount = input.monthly_investment * months;

    // Accumulated value of 1 per month, paid at the start of each month
    let unit_value = if i == 0.0 {
        months
    } else {
        (months * i.ln_1p()).exp_m1() / i * (1.0 + i)
    };
    if !unit_value.is_finite() {
        return Err(ValidationError::Overflow {
            field: SIP_FIELDS.rate,
        });
    }

    let total_value = input.monthly_investment * unit_value;
    if !total_value.is_finite() || !invested_amount.is_finite() {
        return Err(ValidationError::Overflow {
            field: SIP_FIELDS.amount,
        });
    }

    Ok(SipResult {
        invested_amount,
        // With a zero rate both sides are the same product; avoid a -0.0
        estimated_returns: (total_value - invested_amount).max(0.0),
        total_value,
    })
}

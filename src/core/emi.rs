//! Equated monthly installment for a fully amortizing loan.

use crate::core::error::{ValidationError, require_non_negative, require_positive};
use crate::core::input::FieldNames;
use crate::core::schedule::{month_marks, monthly_rate};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const EMI_FIELDS: FieldNames = FieldNames {
    amount: "loanAmount",
    rate: "annualRate",
    years: "years",
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiInput {
    loan_amount: f64,
    annual_rate_percent: f64,
    years: f64,
}

impl EmiInput {
    pub fn new(
        loan_amount: f64,
        annual_rate_percent: f64,
        years: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            loan_amount: require_positive(EMI_FIELDS.amount, loan_amount)?,
            annual_rate_percent: require_non_negative(EMI_FIELDS.rate, annual_rate_percent)?,
            years: require_positive(EMI_FIELDS.years, years)?,
        })
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    pub fn months(&self) -> f64 {
        self.years * 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub emi: f64,
    pub total_interest: f64,
    pub total_amount: f64,
}

/// One installment of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Outstanding principal after this payment.
    pub balance: f64,
}

pub fn compute_emi(input: &EmiInput) -> Result<EmiResult, ValidationError> {
    let i = monthly_rate(input.annual_rate_percent);
    let n = input.months();

    if i == 0.0 {
        let emi = input.loan_amount / n;
        return Ok(EmiResult {
            emi,
            total_interest: 0.0,
            total_amount: input.loan_amount,
        });
    }

    // P·i·(1+i)^n / ((1+i)^n − 1), written as P·i / (1 − (1+i)^−n) so a
    // very long term converges to P·i instead of inf/inf
    let discount = -(-n * i.ln_1p()).exp_m1();
    let emi = input.loan_amount * i / discount;
    let total_amount = emi * n;
    if !emi.is_finite() || !total_amount.is_finite() {
        return Err(ValidationError::Overflow {
            field: EMI_FIELDS.amount,
        });
    }

    Ok(EmiResult {
        emi,
        total_interest: total_amount - input.loan_amount,
        total_amount,
    })
}

/// Month-by-month split of each installment into interest and principal.
///
/// Interest accrues on the opening balance at the monthly rate. The final
/// row pays off whatever principal remains, so the closing balance is zero
/// and the principal column sums to the loan amount. When `start` is given
/// the first installment falls one month after it.
///
/// For a fractional term the last, partial period still accrues a full
/// month of interest on its opening balance. The interest column then sums
/// to `total_interest` only for whole-month terms.
pub fn amortization_schedule(
    input: &EmiInput,
    start: Option<NaiveDate>,
) -> Result<Vec<AmortizationRow>, ValidationError> {
    let EmiResult { emi, .. } = compute_emi(input)?;
    let i = monthly_rate(input.annual_rate_percent);
    let periods = month_marks(input.months(), 1.0, EMI_FIELDS.years)?.len() as u32;

    let mut balance = input.loan_amount;
    let mut rows = Vec::with_capacity(periods as usize);
    for month in 1..=periods {
        let interest = balance * i;
        let principal = if month == periods {
            balance
        } else {
            (emi - interest).min(balance)
        };
        balance = if month == periods {
            0.0
        } else {
            balance - principal
        };

        rows.push(AmortizationRow {
            month,
            date: start.and_then(|date| date.checked_add_months(Months::new(month))),
            payment: principal + interest,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}

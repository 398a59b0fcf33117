//! Raw request fields and their conversion into a numeric triple.

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names the rate may arrive under.
pub const RATE_KEYS: &[&str] = &["annualRate", "annualRatePercent", "rate"];
pub const YEARS_KEYS: &[&str] = &["years"];

/// A request field as it was received, before numeric parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// The three user inputs shared by every calculation mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub amount: Option<RawValue>,
    pub rate: Option<RawValue>,
    pub years: Option<RawValue>,
}

/// Caller-facing names of the three fields, used in error messages.
#[derive(Debug, Clone, Copy)]
pub struct FieldNames {
    pub amount: &'static str,
    pub rate: &'static str,
    pub years: &'static str,
}

/// Parsed numeric inputs. Range checks happen when the mode-specific input
/// record is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub amount: f64,
    pub rate: f64,
    pub years: f64,
}

impl CalculationRequest {
    pub fn new(amount: f64, rate: f64, years: f64) -> Self {
        Self {
            amount,
            rate,
            years,
        }
    }
}

impl RawRequest {
    /// Reads the fields out of a JSON object. The first key present wins;
    /// `null` is treated as absent.
    pub fn from_json_fields(
        fields: &Map<String, Value>,
        amount_keys: &[&'static str],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: lookup(fields, amount_keys)?,
            rate: lookup(fields, RATE_KEYS)?,
            years: lookup(fields, YEARS_KEYS)?,
        })
    }

    /// Parses all three fields in order, failing on the first bad one.
    pub fn parse(&self, names: FieldNames) -> Result<CalculationRequest, ValidationError> {
        Ok(CalculationRequest {
            amount: parse_field(names.amount, self.amount.as_ref())?,
            rate: parse_field(names.rate, self.rate.as_ref())?,
            years: parse_field(names.years, self.years.as_ref())?,
        })
    }
}

fn lookup(
    fields: &Map<String, Value>,
    keys: &[&'static str],
) -> Result<Option<RawValue>, ValidationError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| fields.get(*key).map(|value| (*key, value)))
    else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64().map(RawValue::Number)),
        Value::String(s) => Ok(Some(RawValue::Text(s.clone()))),
        other => Err(ValidationError::NotANumber {
            field: keys.first().copied().unwrap_or(key),
            value: other.to_string(),
        }),
    }
}

fn parse_field(field: &'static str, value: Option<&RawValue>) -> Result<f64, ValidationError> {
    let number = match value {
        None => return Err(ValidationError::Missing { field }),
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::Missing { field });
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ValidationError::NotANumber {
                    field,
                    value: text.clone(),
                })?
        }
    };

    if !number.is_finite() {
        return Err(ValidationError::NonFinite { field });
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAMES: FieldNames = FieldNames {
        amount: "monthlyInvestment",
        rate: "annualRate",
        years: "years",
    };

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected a JSON object"),
        }
    }

    #[test]
    fn test_reads_mode_specific_and_generic_keys() {
        let fields = object(json!({"monthlyInvestment": 5000, "annualRate": 12, "years": 5}));
        let raw = RawRequest::from_json_fields(&fields, &["monthlyInvestment", "amount"]).unwrap();
        assert_eq!(
            raw.parse(NAMES).unwrap(),
            CalculationRequest::new(5000.0, 12.0, 5.0)
        );

        let fields = object(json!({"amount": "5000", "rate": " 12.5 ", "years": 5}));
        let raw = RawRequest::from_json_fields(&fields, &["monthlyInvestment", "amount"]).unwrap();
        assert_eq!(
            raw.parse(NAMES).unwrap(),
            CalculationRequest::new(5000.0, 12.5, 5.0)
        );
    }

    #[test]
    fn test_null_and_blank_are_missing() {
        let fields = object(json!({"monthlyInvestment": null, "annualRate": "", "years": 5}));
        let raw = RawRequest::from_json_fields(&fields, &["monthlyInvestment"]).unwrap();
        assert_eq!(
            raw.parse(NAMES),
            Err(ValidationError::Missing {
                field: "monthlyInvestment"
            })
        );

        let raw = RawRequest {
            amount: Some(100.0.into()),
            rate: Some("".into()),
            years: Some(1.0.into()),
        };
        assert_eq!(
            raw.parse(NAMES),
            Err(ValidationError::Missing {
                field: "annualRate"
            })
        );
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        let fields = object(json!({"monthlyInvestment": true, "annualRate": 1, "years": 5}));
        let err = RawRequest::from_json_fields(&fields, &["monthlyInvestment", "amount"]).unwrap_err();
        assert_eq!(err.field(), "monthlyInvestment");

        let raw = RawRequest {
            amount: Some(100.0.into()),
            rate: Some(1.0.into()),
            years: Some("five".into()),
        };
        assert_eq!(
            raw.parse(NAMES),
            Err(ValidationError::NotANumber {
                field: "years",
                value: "five".to_string()
            })
        );
    }

    #[test]
    fn test_alias_keys_report_canonical_field() {
        let fields = object(json!({"amount": 100, "rate": [1], "years": 5}));
        let err = RawRequest::from_json_fields(&fields, &["loanAmount", "amount"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotANumber {
                field: "annualRate",
                value: "[1]".to_string()
            }
        );

        let fields = object(json!({"amount": {"value": 1}, "annualRate": 1, "years": 5}));
        let err = RawRequest::from_json_fields(&fields, &["loanAmount", "amount"]).unwrap_err();
        assert_eq!(err.field(), "loanAmount");
    }

    #[test]
    fn test_non_finite_text_is_rejected() {
        let raw = RawRequest {
            amount: Some("inf".into()),
            rate: Some("NaN".into()),
            years: Some(1.0.into()),
        };
        assert_eq!(
            raw.parse(NAMES),
            Err(ValidationError::NonFinite {
                field: "monthlyInvestment"
            })
        );
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let raw = RawRequest::default();
        assert_eq!(
            raw.parse(NAMES),
            Err(ValidationError::Missing {
                field: "monthlyInvestment"
            })
        );
    }
}

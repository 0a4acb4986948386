//! Validation of raw conversion parameters

use crate::core::converter::PIVOT_CURRENCY;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required parameters: amount, from, to")]
    MissingParameters,
    #[error("amount must be a non-negative number")]
    InvalidAmount,
    #[error("from and to currencies must differ")]
    SameCurrency,
    #[error("One of from/to must be USD. Only USD conversions supported")]
    UsdRequired,
}

/// A conversion request that satisfies every precondition of [`crate::core::converter::convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl ConversionRequest {
    /// Validates raw parameters. Currency codes are trimmed and uppercased.
    pub fn parse(
        amount: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self, RequestError> {
        let (Some(amount), Some(from), Some(to)) =
            (non_empty(amount), non_empty(from), non_empty(to))
        else {
            return Err(RequestError::MissingParameters);
        };

        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        let amount = amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a >= 0.0)
            .ok_or(RequestError::InvalidAmount)?;

        if from == to {
            return Err(RequestError::SameCurrency);
        }

        if from != PIVOT_CURRENCY && to != PIVOT_CURRENCY {
            return Err(RequestError::UsdRequired);
        }

        Ok(ConversionRequest { amount, from, to })
    }
}

//! USD pivot conversion over a [`RateTable`]

use crate::core::rate_table::RateTable;
use serde::Serialize;
use thiserror::Error;

/// The pivot currency. Every supported conversion has USD on one side.
pub const PIVOT_CURRENCY: &str = "USD";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
    pub description: String,
    pub available_currencies: usize,
}

fn round_to(value: f64, factor: f64) -> f64 {
    (value * factor).round() / factor
}

/// Rounds half away from zero at 2 decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 100.0)
}

/// Rounds half away from zero at 6 decimal places.
pub fn round6(value: f64) -> f64 {
    round_to(value, 1_000_000.0)
}

/// Converts `amount` between USD and one other currency.
///
/// Callers guarantee that `amount` is non-negative, that `from` and `to` differ,
/// that exactly one of them is USD and that both are uppercase. The reported
/// `rate` is the one actually applied (inverted for foreign to USD) rounded to
/// 6 places; `converted_amount` is computed at full precision then rounded to 2.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    table: &RateTable,
) -> Result<ConversionResult, ConvertError> {
    let (record, rate) = if from == PIVOT_CURRENCY {
        let target = table
            .get(to)
            .ok_or_else(|| ConvertError::UnknownCurrency(to.to_string()))?;
        (target, target.rate)
    } else {
        let source = table
            .get(from)
            .ok_or_else(|| ConvertError::UnknownCurrency(from.to_string()))?;
        (source, 1.0 / source.rate)
    };

    Ok(ConversionResult {
        from: from.to_string(),
        to: to.to_string(),
        amount,
        converted_amount: round2(amount * rate),
        rate: round6(rate),
        description: record.description.clone(),
        available_currencies: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate_table::RateRecord;
    use std::sync::Arc;

    fn make_rates(entries: &[(&str, f64, &str)]) -> RateTable {
        entries
            .iter()
            .map(|(code, rate, description)| RateRecord {
                currency_code: code.to_string(),
                rate: *rate,
                effective_date: "2024-01-15".to_string(),
                description: description.to_string(),
            })
            .collect()
    }

    fn rates() -> RateTable {
        make_rates(&[("EUR", 0.89, "Euro Zone-Euro"), ("JPY", 148.5, "Japan-Yen")])
    }

    #[test]
    fn test_usd_to_foreign() {
        let result = convert(100.0, "USD", "EUR", &rates()).unwrap();
        assert_eq!(result.converted_amount, 89.0);
        assert_eq!(result.rate, 0.89);
        assert_eq!(result.from, "USD");
        assert_eq!(result.to, "EUR");
        assert_eq!(result.amount, 100.0);
        assert_eq!(result.description, "Euro Zone-Euro");
        assert_eq!(result.available_currencies, 2);
    }

    #[test]
    fn test_usd_to_foreign_rounds_rate_to_6dp() {
        let table = make_rates(&[("XYZ", 1.23456789, "Test Currency")]);
        let result = convert(1.0, "USD", "XYZ", &table).unwrap();
        assert_eq!(result.rate, 1.234568);
        assert_eq!(result.converted_amount, 1.23);
        assert_eq!(result.available_currencies, 1);
    }

    #[test]
    fn test_foreign_to_usd_uses_inverse_rate() {
        let result = convert(89.0, "EUR", "USD", &rates()).unwrap();
        assert_eq!(result.converted_amount, 100.0);
        assert_eq!(result.available_currencies, 2);

        let result = convert(100.0, "EUR", "USD", &rates()).unwrap();
        assert_eq!(result.rate, round6(1.0 / 0.89));
        assert_eq!(result.rate, 1.123596);
    }

    #[test]
    fn test_foreign_to_usd_description_comes_from_source() {
        let result = convert(100.0, "JPY", "USD", &rates()).unwrap();
        assert_eq!(result.description, "Japan-Yen");
        assert_eq!(result.from, "JPY");
        assert_eq!(result.to, "USD");
    }

    #[test]
    fn test_unknown_currency() {
        let err = convert(100.0, "USD", "ZZZ", &rates()).unwrap_err();
        assert_eq!(err, ConvertError::UnknownCurrency("ZZZ".to_string()));
        assert_eq!(err.to_string(), "Unknown currency code: ZZZ");

        let err = convert(100.0, "ZZZ", "USD", &rates()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown currency code: ZZZ");
    }

    #[test]
    fn test_zero_amount() {
        let result = convert(0.0, "USD", "EUR", &rates()).unwrap();
        assert_eq!(result.converted_amount, 0.0);
    }

    #[test]
    fn test_small_amount_rounds_half_up() {
        let result = convert(0.01, "USD", "JPY", &rates()).unwrap();
        assert_eq!(result.converted_amount, 1.49);
    }

    #[test]
    fn test_large_amount() {
        let result = convert(1_000_000.0, "USD", "JPY", &rates()).unwrap();
        assert_eq!(result.converted_amount, 148_500_000.0);
    }

    #[test]
    fn test_round_trip_is_approximate() {
        let table = rates();
        for amount in [1.0, 12.34, 99.99, 2500.0] {
            let there = convert(amount, "USD", "JPY", &table).unwrap();
            let back = convert(there.converted_amount, "JPY", "USD", &table).unwrap();
            // 0.005 JPY of rounding scaled back to USD plus 0.005 USD
            assert!((back.converted_amount - amount).abs() <= 0.01);
        }
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let result = convert(100.0, "USD", "EUR", &rates()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["convertedAmount"], 89.0);
        assert_eq!(json["availableCurrencies"], 2);
        assert_eq!(json["description"], "Euro Zone-Euro");
        assert!(json.get("converted_amount").is_none());
    }

    #[test]
    fn test_shared_table_across_threads() {
        let table = Arc::new(rates());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || convert(i as f64, "USD", "EUR", &table))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap().unwrap();
            assert_eq!(result.converted_amount, round2(i as f64 * 0.89));
        }
    }
}

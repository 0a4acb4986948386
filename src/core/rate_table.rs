//! Exchange rate table built from the bundled rate dataset

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, trace};

/// Dataset compiled into the binary, used when no `dataset_path` is configured.
pub const BUNDLED_RATES: &str = include_str!("../../data/exchange_rates.csv");

/// Most recent known rate of one currency against USD (`1 USD = rate <currency>`).
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub currency_code: String,
    pub rate: f64,
    pub effective_date: String,
    pub description: String,
}

/// Immutable mapping from currency code to its latest [`RateRecord`].
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<String, RateRecord>,
}

impl RateTable {
    /// Loads the table from `dataset_path`, or from the bundled dataset when `None`.
    pub fn load(dataset_path: Option<&Path>) -> Result<Self> {
        let table = match dataset_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read rate dataset: {}", path.display()))?;
                build_rate_table(&raw)
            }
            None => build_rate_table(BUNDLED_RATES),
        };
        info!(currencies = table.len(), "Loaded exchange rate table");
        Ok(table)
    }

    pub fn get(&self, currency_code: &str) -> Option<&RateRecord> {
        self.rates.get(currency_code)
    }

    pub fn contains(&self, currency_code: &str) -> bool {
        self.rates.contains_key(currency_code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All records ordered by currency code.
    pub fn sorted_records(&self) -> Vec<&RateRecord> {
        let mut records: Vec<_> = self.rates.values().collect();
        records.sort_by(|a, b| a.currency_code.cmp(&b.currency_code));
        records
    }
}

impl FromIterator<RateRecord> for RateTable {
    /// Collects records keyed by code. Later records replace earlier ones unconditionally.
    fn from_iter<I: IntoIterator<Item = RateRecord>>(iter: I) -> Self {
        let rates = iter
            .into_iter()
            .map(|record| (record.currency_code.clone(), record))
            .collect();
        RateTable { rates }
    }
}

/// Reads the longest decimal number at the start of `text`, ignoring anything after it.
///
/// Accepts an optional sign, digits with an optional fraction, an optional exponent
/// and `Infinity`. `"0.89abc"` reads as `0.89` and `"0x10"` as `0`.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Parses a single data row `id,description,rate,effective_date,currency_code`.
///
/// Splitting is a plain comma split with no quoting support, so a description
/// containing a comma shifts the remaining fields.
fn parse_row(line: &str) -> Option<RateRecord> {
    let mut fields = line.split(',').skip(1);
    let description = fields.next()?;
    let rate_text = fields.next()?;
    let effective_date = fields.next()?;
    let currency_code = fields.next()?;

    if currency_code.is_empty() || rate_text.is_empty() {
        return None;
    }

    let rate = parse_leading_float(rate_text).filter(|r| r.is_finite())?;

    Some(RateRecord {
        currency_code: currency_code.trim().to_string(),
        rate,
        effective_date: effective_date.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// Builds a [`RateTable`] from raw CSV text, keeping the freshest row per currency.
///
/// The first line is always treated as a header. Malformed rows are skipped, so
/// this never fails. Among rows with the same effective date the last one wins.
/// Currency codes are kept verbatim; callers uppercase before lookup.
pub fn build_rate_table(raw: &str) -> RateTable {
    let mut rates: HashMap<String, RateRecord> = HashMap::new();
    let mut skipped = 0usize;

    for (index, line) in raw.trim().split('\n').enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(record) = parse_row(line) else {
            trace!(line_number = index + 1, row = line, "Skipping malformed rate row");
            skipped += 1;
            continue;
        };

        match rates.get(&record.currency_code) {
            Some(existing) if record.effective_date < existing.effective_date => {}
            _ => {
                rates.insert(record.currency_code.clone(), record);
            }
        }
    }

    debug!(currencies = rates.len(), skipped, "Built exchange rate table");
    RateTable { rates }
}

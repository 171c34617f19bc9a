//! Exchange quote model and its wire formatting.

use std::collections::BTreeMap;

use serde::Serialize;

/// Sale and purchase rate of one currency.
///
/// Either side may be missing from the provider's answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub sale: Option<f64>,
    pub purchase: Option<f64>,
}

impl CurrencyRate {
    pub fn new(sale: Option<f64>, purchase: Option<f64>) -> Self {
        Self { sale, purchase }
    }
}

/// Rates of the requested currencies for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeQuote {
    /// Date as reported by the provider (`DD.MM.YYYY`)
    pub date: String,
    /// Currency code to rate, ordered by code
    pub rates: BTreeMap<String, CurrencyRate>,
}

impl ExchangeQuote {
    /// Build a quote keeping only the currencies in `requested`.
    ///
    /// Codes the provider did not report are left out of the result.
    pub fn filtered<I>(date: String, reported: I, requested: &[String]) -> Self
    where
        I: IntoIterator<Item = (String, CurrencyRate)>,
    {
        let rates = reported
            .into_iter()
            .filter(|(code, _)| requested.iter().any(|wanted| wanted == code))
            .collect();
        Self { date, rates }
    }

    /// Render the `{CUR: {sale, purchase}, ...}` part of a summary line
    pub fn rates_json(&self) -> String {
        // A map of plain strings and optional floats always serializes.
        serde_json::to_string(&self.rates).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render the summary line broadcast to clients: `<date>: <rates>`
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.date, self.rates_json())
    }

    /// Render the entry appended to the JSON array log: `{"<date>": {<rates>}}`
    pub fn to_log_value(&self) -> serde_json::Value {
        let mut entry = serde_json::Map::new();
        entry.insert(
            self.date.clone(),
            serde_json::to_value(&self.rates).unwrap_or_default(),
        );
        serde_json::Value::Object(entry)
    }
}

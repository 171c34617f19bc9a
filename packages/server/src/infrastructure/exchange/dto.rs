//! Provider response DTOs and their conversion to the domain model.

use serde::Deserialize;

use crate::domain::{CurrencyRate, ExchangeQuote};

/// Body of `GET <base>?date=DD.MM.YYYY`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRatesResponse {
    pub date: String,
    #[serde(default)]
    pub exchange_rate: Vec<ExchangeRateDto>,
}

/// One entry of `exchangeRate`. Unused provider fields (NB rates, base currency) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateDto {
    #[serde(default)]
    pub currency: String,
    pub sale_rate: Option<f64>,
    pub purchase_rate: Option<f64>,
}

impl ExchangeRatesResponse {
    /// DTO から Domain Model への変換（要求された通貨のみ残す）
    pub fn into_quote(self, currencies: &[String]) -> ExchangeQuote {
        let reported = self.exchange_rate.into_iter().map(|rate| {
            (
                rate.currency,
                CurrencyRate::new(rate.sale_rate, rate.purchase_rate),
            )
        });
        ExchangeQuote::filtered(self.date, reported, currencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_body() {
        // テスト項目: プロバイダのレスポンスが DTO に変換され、余分なフィールドは無視される
        // given (前提条件):
        let body = r#"{
            "date": "01.12.2024",
            "bank": "PB",
            "baseCurrency": 980,
            "exchangeRate": [
                {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 43.9,
                 "purchaseRateNB": 43.9, "saleRate": 44.25, "purchaseRate": 43.55},
                {"baseCurrency": "UAH", "currency": "AZN", "saleRateNB": 24.4,
                 "purchaseRateNB": 24.4}
            ]
        }"#;

        // when (操作):
        let response: ExchangeRatesResponse = serde_json::from_str(body).unwrap();

        // then (期待する結果):
        assert_eq!(response.date, "01.12.2024");
        assert_eq!(response.exchange_rate.len(), 2);
        assert_eq!(response.exchange_rate[0].sale_rate, Some(44.25));
        assert_eq!(response.exchange_rate[1].purchase_rate, None);
    }

    #[test]
    fn test_into_quote_filters_currencies() {
        // テスト項目: 要求外の通貨は変換時に取り除かれる
        // given (前提条件):
        let response = ExchangeRatesResponse {
            date: "01.12.2024".to_string(),
            exchange_rate: vec![
                ExchangeRateDto {
                    currency: "EUR".to_string(),
                    sale_rate: Some(39.5),
                    purchase_rate: Some(39.0),
                },
                ExchangeRateDto {
                    currency: "GBP".to_string(),
                    sale_rate: Some(50.0),
                    purchase_rate: Some(49.0),
                },
            ],
        };

        // when (操作):
        let quote = response.into_quote(&["EUR".to_string(), "USD".to_string()]);

        // then (期待する結果):
        assert_eq!(quote.date, "01.12.2024");
        assert_eq!(quote.rates.len(), 1);
        assert_eq!(
            quote.rates["EUR"],
            CurrencyRate::new(Some(39.5), Some(39.0))
        );
    }
}

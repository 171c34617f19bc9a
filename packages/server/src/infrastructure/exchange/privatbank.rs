//! HTTP client for the PrivatBank exchange-rate archive.

use std::sync::Arc;

use async_trait::async_trait;
use ratecast_shared::time::{Clock, format_provider_date};
use reqwest::StatusCode;

use super::dto::ExchangeRatesResponse;
use crate::domain::{ExchangeQuote, FetchError, RateProvider};

/// Archive endpoint, indexed by `?date=DD.MM.YYYY`
pub const DEFAULT_PROVIDER_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";

/// [`RateProvider`] backed by the PrivatBank HTTP API.
///
/// No timeout is configured beyond what `reqwest` applies by default.
pub struct PrivatBankClient {
    http: reqwest::Client,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl PrivatBankClient {
    /// Create a client for `base_url`, resolving day offsets with `clock`
    pub fn new(base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, clock)
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            clock,
        }
    }
}

#[async_trait]
impl RateProvider for PrivatBankClient {
    async fn fetch_rates(
        &self,
        day_offset: u32,
        currencies: &[String],
    ) -> Result<ExchangeQuote, FetchError> {
        let date = format_provider_date(self.clock.date_days_ago(day_offset));
        tracing::debug!("Requesting exchange rates for {} from {}", date, self.base_url);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("date", date.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::RemoteStatus {
                status: status.as_u16(),
                date,
            });
        }

        let body: ExchangeRatesResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        Ok(body.into_quote(currencies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::{Json, Router, extract::Query, http::StatusCode as HttpStatus, routing::get};
    use chrono::{Local, TimeZone};
    use ratecast_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - PrivatBankClient が日付クエリ付きでリクエストを送ること
    // - 200 以外のステータス、通信エラー、壊れたボディがそれぞれのエラーになること
    //
    // 【どのようなシナリオをテストするか】
    // 1. 正常系: 要求した通貨のみが返る
    // 2. 異常系: 500 → RemoteStatus
    // 3. 異常系: 接続先なし → Transport
    // 4. 異常系: JSON でないボディ → Decode
    // ========================================

    fn fixed_clock() -> Arc<dyn Clock> {
        let now = Local
            .with_ymd_and_hms(2024, 12, 2, 12, 0, 0)
            .single()
            .unwrap();
        Arc::new(FixedClock::new(now))
    }

    /// Serve a stub provider on an ephemeral port and return its base URL
    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/p24api/exchange_rates", addr)
    }

    async fn provider_stub(
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<serde_json::Value>, HttpStatus> {
        let date = params.get("date").cloned().unwrap_or_default();
        // only "yesterday" (01.12.2024) has data
        if date != "01.12.2024" {
            return Err(HttpStatus::INTERNAL_SERVER_ERROR);
        }
        Ok(Json(serde_json::json!({
            "date": date,
            "exchangeRate": [
                {"currency": "EUR", "saleRate": 39.5, "purchaseRate": 39.0},
                {"currency": "USD", "saleRate": 37.2, "purchaseRate": 36.8},
                {"currency": "GBP", "saleRate": 50.1, "purchaseRate": 49.2}
            ]
        })))
    }

    #[tokio::test]
    async fn test_fetch_rates_success() {
        // テスト項目: 日付オフセットから算出した日付で取得し、要求した通貨のみ返す
        // given (前提条件):
        let app = Router::new().route("/p24api/exchange_rates", get(provider_stub));
        let base_url = spawn_stub(app).await;
        let client = PrivatBankClient::new(base_url, fixed_clock());

        // when (操作):
        let result = client.fetch_rates(1, &["EUR".to_string()]).await;

        // then (期待する結果):
        let quote = result.unwrap();
        assert_eq!(quote.date, "01.12.2024");
        assert_eq!(quote.rates.len(), 1);
        assert_eq!(quote.rates["EUR"].sale, Some(39.5));
        assert_eq!(quote.rates["EUR"].purchase, Some(39.0));
    }

    #[tokio::test]
    async fn test_fetch_rates_non_success_status() {
        // テスト項目: 200 以外のレスポンスは RemoteStatus エラーになる
        // given (前提条件):
        let app = Router::new().route("/p24api/exchange_rates", get(provider_stub));
        let base_url = spawn_stub(app).await;
        let client = PrivatBankClient::new(base_url, fixed_clock());

        // when (操作):
        let result = client.fetch_rates(0, &["EUR".to_string()]).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(FetchError::RemoteStatus {
                status: 500,
                date: "02.12.2024".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_rates_transport_error() {
        // テスト項目: 接続できない場合は Transport エラーになる
        // given (前提条件): ポートを確保してすぐに解放する
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = PrivatBankClient::new(format!("http://{}/rates", addr), fixed_clock());

        // when (操作):
        let result = client.fetch_rates(0, &["EUR".to_string()]).await;

        // then (期待する結果):
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_rates_malformed_body() {
        // テスト項目: JSON として解釈できないボディは Decode エラーになる
        // given (前提条件):
        let app = Router::new().route("/rates", get(|| async { "not json" }));
        let addr_url = spawn_stub(app).await;
        let base_url = addr_url.replace("/p24api/exchange_rates", "/rates");
        let client = PrivatBankClient::new(base_url, fixed_clock());

        // when (操作):
        let result = client.fetch_rates(0, &["EUR".to_string()]).await;

        // then (期待する結果):
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}

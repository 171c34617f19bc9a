//! UseCase: 複数日分の為替レート取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - FetchExchangeRatesUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 日数分だけ（オフセット 0..days-1）取得が試行されることを保証
//! - 1 日分の失敗でバッチ全体が中断されないことを保証
//! - 範囲外の日数ではプロバイダが一切呼ばれないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：全日取得成功
//! - 異常系：一部の日だけ失敗、範囲外の日数

use std::sync::Arc;

use crate::domain::{ExchangeQuery, ExchangeQuote, RangeError, RateProvider};

/// 為替レート取得のユースケース
pub struct FetchExchangeRatesUseCase {
    /// RateProvider（為替レート取得の抽象化）
    provider: Arc<dyn RateProvider>,
}

impl FetchExchangeRatesUseCase {
    /// 新しい FetchExchangeRatesUseCase を作成
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    /// 為替レート取得を実行
    ///
    /// Days are fetched one after another, newest first. A failed day is logged
    /// and left out; it never aborts the batch.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ExchangeQuote>)` - 取得に成功した日のみ（最大 `days` 件）
    /// * `Err(RangeError)` - 日数が 1〜10 の範囲外（プロバイダは呼ばれない）
    pub async fn execute(&self, query: &ExchangeQuery) -> Result<Vec<ExchangeQuote>, RangeError> {
        let days = query.validated_days()?;

        let mut quotes = Vec::with_capacity(days as usize);
        for day_offset in 0..days {
            match self
                .provider
                .fetch_rates(day_offset, &query.currencies)
                .await
            {
                Ok(quote) => quotes.push(quote),
                Err(e) => {
                    tracing::warn!("No exchange rates for day offset {}: {}", day_offset, e);
                }
            }
        }

        tracing::info!(
            "Fetched exchange rates for {} of {} day(s)",
            quotes.len(),
            days
        );
        Ok(quotes)
    }
}

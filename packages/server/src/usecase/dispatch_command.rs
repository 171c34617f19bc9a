//! UseCase: 受信メッセージのコマンド処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchCommandUseCase::execute() メソッド
//! - チャットのエコーと exchange コマンドの応答文の組み立て、コマンドログへの記録
//!
//! ### なぜこのテストが必要か
//! - exchange コマンドは成否にかかわらず 1 回だけ記録されることを保証
//! - 範囲外の日数は送信者にのみ返され、記録もリモート呼び出しもされないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：チャット、exchange（一部の日が失敗）
//! - 異常系：範囲外の日数、コマンドログへの書き込み失敗

use std::sync::Arc;

use ratecast_shared::time::Clock;

use crate::domain::{
    Command, CommandSink, ExchangeQuery, ExchangeQuote, LogEntry, parse_command,
};

use super::{error::DispatchError, fetch_exchange_rates::FetchExchangeRatesUseCase};

/// Render the broadcast text for a chat line
pub fn chat_echo(text: &str) -> String {
    format!("Received message: {}", text)
}

/// Render the broadcast text for an exchange query: one `<date>: <rates>` line per day
pub fn render_exchange_summary(query: &ExchangeQuery, quotes: &[ExchangeQuote]) -> String {
    if quotes.is_empty() {
        return format!(
            "No exchange rates available for the last {} day(s) ({})",
            query.days,
            query.currencies.join(", ")
        );
    }
    quotes
        .iter()
        .map(ExchangeQuote::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// コマンド処理のユースケース
pub struct DispatchCommandUseCase {
    /// FetchExchangeRatesUseCase（為替レート取得のユースケース）
    fetch_exchange_rates_usecase: Arc<FetchExchangeRatesUseCase>,
    /// CommandSink（コマンドログの抽象化）
    command_sink: Arc<dyn CommandSink>,
    /// Clock（ログのタイムスタンプ用）
    clock: Arc<dyn Clock>,
}

impl DispatchCommandUseCase {
    /// 新しい DispatchCommandUseCase を作成
    pub fn new(
        fetch_exchange_rates_usecase: Arc<FetchExchangeRatesUseCase>,
        command_sink: Arc<dyn CommandSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetch_exchange_rates_usecase,
            command_sink,
            clock,
        }
    }

    /// コマンド処理を実行
    ///
    /// # Arguments
    ///
    /// * `line` - クライアントから受信した 1 行（生のテキスト）
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 全クライアントにブロードキャストするテキスト
    /// * `Err(DispatchError)` - 送信者にのみ返すエラー
    pub async fn execute(&self, line: &str) -> Result<String, DispatchError> {
        match parse_command(line) {
            Command::Broadcast(text) => Ok(chat_echo(&text)),
            Command::ExchangeQuery(query) => {
                let quotes = self.fetch_exchange_rates_usecase.execute(&query).await?;
                let response = render_exchange_summary(&query, &quotes);

                // The attempt is recorded even when no day succeeded.
                let entry = LogEntry::new(line, self.clock.now());
                if let Err(e) = self.command_sink.append(entry).await {
                    tracing::error!("Failed to log command '{}': {}", line, e);
                }

                Ok(response)
            }
        }
    }
}

//! Command model and the line parser.
//!
//! Parsing is lenient: it never fails. Range validation happens later, before
//! any remote call is made.

use super::error::RangeError;

/// Keyword that turns a line into an exchange-rate query.
pub const EXCHANGE_KEYWORD: &str = "exchange";

/// Number of days queried when the line does not say.
pub const DEFAULT_DAYS: i64 = 1;

/// Largest number of days a single query may cover.
pub const MAX_DAYS: i64 = 10;

/// Currencies queried when the line does not name any.
pub const DEFAULT_CURRENCIES: [&str; 2] = ["EUR", "USD"];

/// A parsed inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain chat text, broadcast as-is
    Broadcast(String),
    /// Exchange-rate lookup for the last `days` days
    ExchangeQuery(ExchangeQuery),
}

/// Exchange-rate lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeQuery {
    /// Number of days requested, unvalidated
    pub days: i64,
    /// Upper-cased currency codes, in request order
    pub currencies: Vec<String>,
}

impl ExchangeQuery {
    /// Create a query for `days` days with the given currency codes
    pub fn new(days: i64, currencies: Vec<String>) -> Self {
        Self { days, currencies }
    }

    /// Check the day count against `1..=MAX_DAYS`, returning it as a fetch count
    pub fn validated_days(&self) -> Result<u32, RangeError> {
        if (1..=MAX_DAYS).contains(&self.days) {
            // bounded by MAX_DAYS above
            Ok(self.days as u32)
        } else {
            Err(RangeError { days: self.days })
        }
    }
}

fn default_currencies() -> Vec<String> {
    DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

/// Read an optionally signed run of ASCII digits as a day count, saturating on overflow
fn parse_days(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match token.parse::<i64>() {
        Ok(days) => Some(days),
        Err(_) if token.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parse one inbound line into a [`Command`].
///
/// A line starting with `exchange` is read as `exchange [days] [currency...]`.
/// A first argument that is not an integer is not a day count: days fall back to
/// [`DEFAULT_DAYS`] and the token is read as a currency code instead. An integer
/// too large for `i64` saturates, so the range check still rejects it.
pub fn parse_command(line: &str) -> Command {
    if !line.starts_with(EXCHANGE_KEYWORD) {
        return Command::Broadcast(line.to_string());
    }

    // The first token is the keyword itself (possibly with trailing characters).
    let mut args = line.split_whitespace().skip(1).peekable();

    let days = match args.peek().and_then(|token| parse_days(token)) {
        Some(days) => {
            args.next();
            days
        }
        None => DEFAULT_DAYS,
    };

    let currencies: Vec<String> = args.map(|code| code.to_uppercase()).collect();
    let currencies = if currencies.is_empty() {
        default_currencies()
    } else {
        currencies
    };

    Command::ExchangeQuery(ExchangeQuery::new(days, currencies))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(days: i64, currencies: &[&str]) -> Command {
        Command::ExchangeQuery(ExchangeQuery::new(
            days,
            currencies.iter().map(|c| c.to_string()).collect(),
        ))
    }

    #[test]
    fn test_parse_plain_text_is_broadcast() {
        // テスト項目: exchange で始まらない行はそのままブロードキャストされる
        // given (前提条件):
        let line = "hello everyone";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, Command::Broadcast("hello everyone".to_string()));
    }

    #[test]
    fn test_parse_keyword_must_be_at_start() {
        // テスト項目: 行頭以外の exchange はコマンドとして扱われない
        // given (前提条件):
        let line = " exchange 2";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, Command::Broadcast(" exchange 2".to_string()));
    }

    #[test]
    fn test_parse_bare_exchange_uses_defaults() {
        // テスト項目: 引数なしの exchange は 1 日分・EUR/USD になる
        // given (前提条件):
        let line = "exchange";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(1, &["EUR", "USD"]));
    }

    #[test]
    fn test_parse_days_and_currencies() {
        // テスト項目: 日数と通貨コードが正しく解析され、通貨は大文字に正規化される
        // given (前提条件):
        let line = "exchange 3 eur PLN";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(3, &["EUR", "PLN"]));
    }

    #[test]
    fn test_parse_non_numeric_days_falls_back_to_default() {
        // テスト項目: 数値でない日数は省略扱いとなり、その語は通貨コードとして読まれる
        // given (前提条件):
        let line = "exchange gbp";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(1, &["GBP"]));
    }

    #[test]
    fn test_parse_keeps_out_of_range_days() {
        // テスト項目: 範囲外の日数も解析段階ではそのまま保持される
        // given (前提条件):
        let line = "exchange 11";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(11, &["EUR", "USD"]));
    }

    #[test]
    fn test_validated_days_accepts_window() {
        // テスト項目: 1〜10 日は受け付けられる
        // given (前提条件):
        let one = ExchangeQuery::new(1, vec![]);
        let ten = ExchangeQuery::new(MAX_DAYS, vec![]);

        // when (操作) / then (期待する結果):
        assert_eq!(one.validated_days(), Ok(1));
        assert_eq!(ten.validated_days(), Ok(10));
    }

    #[test]
    fn test_validated_days_rejects_outside_window() {
        // テスト項目: 10 日超、0 日以下は RangeError になる
        // given (前提条件):
        let too_many = ExchangeQuery::new(11, vec![]);
        let zero = ExchangeQuery::new(0, vec![]);
        let negative = ExchangeQuery::new(-2, vec![]);

        // when (操作) / then (期待する結果):
        assert_eq!(too_many.validated_days(), Err(RangeError { days: 11 }));
        assert_eq!(zero.validated_days(), Err(RangeError { days: 0 }));
        assert_eq!(negative.validated_days(), Err(RangeError { days: -2 }));
    }

    #[test]
    fn test_range_error_message_is_human_readable() {
        // テスト項目: RangeError のメッセージに上限日数が含まれる
        // given (前提条件):
        let error = RangeError { days: 11 };

        // when (操作):
        let message = error.to_string();

        // then (期待する結果):
        assert!(message.starts_with("Error:"));
        assert!(message.contains("between 1 and 10"));
        assert!(message.contains("11"));
    }

    #[test]
    fn test_range_error_message_states_lower_bound() {
        // テスト項目: 0 日の要求に対するメッセージに下限が明示される
        // given (前提条件):
        let error = ExchangeQuery::new(0, vec![]).validated_days().unwrap_err();

        // when (操作):
        let message = error.to_string();

        // then (期待する結果):
        assert_eq!(
            message,
            "Error: The number of days must be between 1 and 10 (requested 0)."
        );
    }

    #[test]
    fn test_parse_overflowing_days_is_still_a_day_count() {
        // テスト項目: i64 に収まらない日数も日数として扱われ、範囲チェックで拒否される
        // given (前提条件):
        let line = "exchange 99999999999999999999 eur";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(i64::MAX, &["EUR"]));
        let Command::ExchangeQuery(exchange) = command else {
            unreachable!();
        };
        assert_eq!(
            exchange.validated_days(),
            Err(RangeError { days: i64::MAX })
        );
    }

    #[test]
    fn test_parse_overflowing_negative_days_saturates() {
        // テスト項目: 負の方向に溢れる日数は i64::MIN に飽和する
        // given (前提条件):
        let line = "exchange -99999999999999999999";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(i64::MIN, &["EUR", "USD"]));
    }

    #[test]
    fn test_parse_sign_alone_is_not_a_day_count() {
        // テスト項目: 符号だけの語は日数ではなく通貨コードとして読まれる
        // given (前提条件):
        let line = "exchange - usd";

        // when (操作):
        let command = parse_command(line);

        // then (期待する結果):
        assert_eq!(command, query(1, &["-", "USD"]));
    }
}

//! Provider Response Schemas
//!
//! One tagged record per analytics endpoint. Payloads are parsed into these at
//! the fetch boundary; anything that does not fit is an upstream error rather
//! than a fault deep inside formatting.
//!
//! Numeric fields use `rust_decimal`. The provider mixes JSON numbers and
//! numeric strings, and `Decimal` accepts both.

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Token details
// ============================================================================

/// `GET /token/{address}`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    /// Display name (e.g., "Bonk")
    pub name: Option<String>,

    /// Ticker symbol (e.g., "BONK")
    pub symbol: Option<String>,

    /// SPL mint address
    pub mint_address: Option<String>,

    /// Current price in USD
    pub price: Option<Decimal>,

    /// On-chain decimal places
    #[serde(rename = "decimal")]
    pub decimals: Option<u8>,

    /// Token logo, sent as a photo when present
    pub logo_url: Option<String>,

    pub category: Option<String>,

    /// Verified by the provider
    pub verified: Option<bool>,

    /// Last refresh, Unix seconds
    pub update_time: Option<i64>,

    /// Circulating supply in whole tokens
    pub current_supply: Option<Decimal>,

    /// Market capitalization in USD
    pub market_cap: Option<Decimal>,

    /// Traded volume over the last 24 hours in USD
    #[serde(rename = "usdValueVolume24h")]
    pub volume_24h_usd: Option<Decimal>,
}

// ============================================================================
// Wallet token balances
// ============================================================================

/// `GET /account/token-balance/{address}`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalances {
    /// Wallet the balances belong to
    pub owner_address: Option<String>,

    /// Provider-computed wallet value in USD
    pub total_token_value_usd: Option<Decimal>,

    /// 1-day change of the wallet value, in percent
    #[serde(rename = "totalTokenValueUsd1dChange")]
    pub total_value_change_1d_pct: Option<Decimal>,

    /// Number of tokens held, including any not in `data`
    pub total_token_count: Option<u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<TokenBalanceEntry>,
}

/// One token held by a wallet
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceEntry {
    pub name: Option<String>,

    pub symbol: Option<String>,

    pub mint_address: Option<String>,

    /// Quantity held
    pub amount: Option<Decimal>,

    /// Position value in USD; the sort key for balance reports
    pub value_usd: Option<Decimal>,

    /// Unit price in USD
    pub price_usd: Option<Decimal>,

    /// 1-day price change, in percent
    #[serde(rename = "priceUsd1dChange")]
    pub price_change_1d_pct: Option<Decimal>,

    pub category: Option<String>,

    pub verified: Option<bool>,
}

// ============================================================================
// Wallet PnL
// ============================================================================

/// `GET /account/pnl/{address}`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletPnl {
    pub summary: PnlSummary,

    /// Per-token breakdown, in provider order
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_metrics: Vec<TokenPnl>,
}

/// Aggregate trading performance of a wallet
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    /// Fraction of winning trades, 0..=1
    pub win_rate: Option<Decimal>,

    /// Closed-position PnL in USD
    pub realized_pnl_usd: Option<Decimal>,

    /// Open-position PnL in USD
    pub unrealized_pnl_usd: Option<Decimal>,

    pub unique_tokens_traded: Option<u64>,

    /// Mean trade size in USD
    pub average_trade_usd: Option<Decimal>,

    pub trades_count: Option<u64>,

    pub winning_trades_count: Option<u64>,

    pub losing_trades_count: Option<u64>,

    /// Total traded volume in USD
    pub trades_volume_usd: Option<Decimal>,

    pub best_performing_token: Option<PerformingToken>,

    pub worst_performing_token: Option<PerformingToken>,

    /// Daily PnL, oldest first. Up to seven values; empty hides the section.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pnl_trend_seven_days: Vec<Option<Decimal>>,
}

/// Best/worst token is either a bare label or a small record
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PerformingToken {
    Label(String),
    Detail(PerformingTokenDetail),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformingTokenDetail {
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub token_address: Option<String>,
    pub pnl_usd: Option<Decimal>,
}

impl PerformingToken {
    /// Best human label available
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            PerformingToken::Label(s) => Some(s.as_str()),
            PerformingToken::Detail(d) => d
                .token_symbol
                .as_deref()
                .or(d.token_name.as_deref())
                .or(d.token_address.as_deref()),
        };
        label.filter(|s| !s.is_empty())
    }
}

/// Per-token trading metrics
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPnl {
    #[serde(alias = "tokenName")]
    pub name: Option<String>,

    #[serde(alias = "tokenSymbol")]
    pub symbol: Option<String>,

    pub token_address: Option<String>,

    /// Closed-position PnL in USD
    pub realized_pnl_usd: Option<Decimal>,

    /// Open-position PnL in USD
    pub unrealized_pnl_usd: Option<Decimal>,

    pub trades_count: Option<u64>,

    /// Traded volume in USD
    pub volume_usd: Option<Decimal>,
}

// ============================================================================
// Top holders
// ============================================================================

/// `GET /token/{address}/top-holders`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TopHolders {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<HolderEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderEntry {
    /// Provider rank, 1 = largest holder
    pub rank: u32,

    pub owner_address: String,

    /// Known label for the owner (exchange, program, ...)
    pub owner_name: Option<String>,

    /// Tokens held
    pub balance: Option<Decimal>,

    /// Holding value in USD
    pub value_usd: Option<Decimal>,

    /// Already a percentage (12.5 means 12.5%)
    pub percentage_of_supply_held: Option<Decimal>,
}

// ============================================================================
// OHLCV history
// ============================================================================

/// `GET /price/{address}/token-ohlcv?resolution=..`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenOhlcv {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<OhlcvRecord>,
}

/// Raw candle as returned by the provider
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OhlcvRecord {
    /// Candle open, Unix seconds
    pub time: i64,

    pub open: Option<Decimal>,

    pub high: Option<Decimal>,

    pub low: Option<Decimal>,

    /// Close price in USD
    pub close: Option<Decimal>,

    /// Volume in tokens
    pub volume: Option<Decimal>,

    /// Volume in USD
    pub volume_usd: Option<Decimal>,
}

/// Candle reduced to what the trend and chart need
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OhlcvPoint {
    /// Unix seconds
    pub time: i64,

    /// Close price in USD
    pub close: Decimal,

    /// Volume in USD
    pub volume_usd: Decimal,
}

impl TokenOhlcv {
    /// Complete candles in chronological order, keeping at most the `limit`
    /// most recent. Candles missing a close or a USD volume are dropped so every
    /// projection of the result has the same length.
    pub fn into_points(self, limit: usize) -> Vec<OhlcvPoint> {
        let mut points: Vec<OhlcvPoint> = self
            .data
            .into_iter()
            .filter_map(|r| {
                Some(OhlcvPoint {
                    time: r.time,
                    close: r.close?,
                    volume_usd: r.volume_usd?,
                })
            })
            .collect();

        points.sort_by_key(|p| p.time);

        if points.len() > limit {
            points.drain(..points.len() - limit);
        }
        points
    }
}

impl OhlcvPoint {
    /// ISO-8601 timestamp, used in advisor prompts
    pub fn iso_time(&self) -> String {
        DateTime::from_timestamp(self.time, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| self.time.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_balances_accept_strings_and_numbers() {
        let balances: TokenBalances = serde_json::from_value(json!({
            "totalTokenValueUsd": "1523.44",
            "totalTokenValueUsd1dChange": -2.5,
            "totalTokenCount": 2,
            "data": [
                {"name": "Wrapped SOL", "symbol": "SOL", "amount": "3.2", "valueUsd": 480.1,
                 "priceUsd": "150.03", "priceUsd1dChange": "1.2", "category": "Native", "verified": true},
                {"name": "Bonk", "symbol": "BONK", "amount": 1000000, "valueUsd": null}
            ]
        }))
        .unwrap();

        assert_eq!(balances.total_token_value_usd, Some(dec!(1523.44)));
        assert_eq!(balances.total_value_change_1d_pct, Some(dec!(-2.5)));
        assert_eq!(balances.data.len(), 2);
        assert_eq!(balances.data[0].value_usd, Some(dec!(480.1)));
        assert_eq!(balances.data[1].value_usd, None);
        assert_eq!(balances.data[1].verified, None);
    }

    #[test]
    fn test_null_collections_become_empty() {
        let holders: TopHolders = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(holders.data.is_empty());

        let pnl: WalletPnl = serde_json::from_value(json!({
            "summary": {"winRate": 0.5, "pnlTrendSevenDays": null},
            "tokenMetrics": null
        }))
        .unwrap();
        assert!(pnl.summary.pnl_trend_seven_days.is_empty());
        assert!(pnl.token_metrics.is_empty());
    }

    #[test]
    fn test_missing_summary_is_rejected() {
        let result: Result<WalletPnl, _> = serde_json::from_value(json!({"tokenMetrics": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_performing_token_shapes() {
        let label: PerformingToken = serde_json::from_value(json!("BONK")).unwrap();
        assert_eq!(label.label(), Some("BONK"));

        let detail: PerformingToken =
            serde_json::from_value(json!({"tokenSymbol": "WIF", "pnlUsd": 12.5})).unwrap();
        assert_eq!(detail.label(), Some("WIF"));

        let empty: PerformingToken = serde_json::from_value(json!("")).unwrap();
        assert_eq!(empty.label(), None);
    }

    #[test]
    fn test_ohlcv_points_are_complete_sorted_and_bounded() {
        let ohlcv: TokenOhlcv = serde_json::from_value(json!({
            "data": [
                {"time": 300, "close": "3", "volumeUsd": "30"},
                {"time": 100, "close": "1", "volumeUsd": "10"},
                {"time": 200, "close": null, "volumeUsd": "20"},
                {"time": 400, "close": "4", "volumeUsd": "40"}
            ]
        }))
        .unwrap();

        let points = ohlcv.clone().into_points(10);
        let times: Vec<i64> = points.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![100, 300, 400]);

        let recent = ohlcv.into_points(2);
        let times: Vec<i64> = recent.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![300, 400]);
    }
}

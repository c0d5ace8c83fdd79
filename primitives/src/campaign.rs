use serde::{Deserialize, Serialize};
use slog::{debug, warn, Logger};

use crate::{util::serde::null_as_default, Amount, AmountError};

/// The body returned by the upstream `GetBySkin` stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub results: Vec<StatsRecord>,
}

/// A single row of the upstream stats report.
///
/// Missing or `null` fields are defaulted, a field with the wrong JSON type
/// (e.g. `"signups": "5"`) fails the deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub campaign: String,
    #[serde(
        rename = "signups",
        default,
        deserialize_with = "null_as_default::deserialize"
    )]
    pub sign_ups: i64,
    /// First time deposits
    #[serde(default)]
    pub ftd: Option<i64>,
    #[serde(default)]
    pub cpa: Option<i64>,
    #[serde(default)]
    pub deposits: Amount,
    /// Gross gaming revenue
    #[serde(default)]
    pub ggr: Amount,
    #[serde(default)]
    pub bet: Amount,
    #[serde(default)]
    pub win: Amount,
    #[serde(default)]
    pub bonus: Amount,
    #[serde(default)]
    pub depo: Amount,
    #[serde(default)]
    pub withd: Amount,
    #[serde(default)]
    pub netrev: Amount,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub rev_share_commission: f64,
}

/// The normalized campaign report returned to our callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub date: String,
    /// The campaign name, exposed as `id`
    #[serde(rename = "id")]
    pub campaign: String,
    #[serde(rename = "signups")]
    pub sign_ups: i64,
    pub ftd: i64,
    pub cpa: i64,
    pub deposits: f64,
    /// Not provided by the upstream, always `0`
    pub clicks: i64,
    /// Not provided by the upstream, always `0.0`
    pub cpa_commission: f64,
    pub rev_share_commission: f64,
    /// Not calculated, always `0.0`
    pub total_commission: f64,
    pub ggr: f64,
    pub bet: f64,
    pub win: f64,
    pub bonus: f64,
    pub depo: f64,
    pub withd: f64,
    pub netrev: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignsResponse {
    pub data: Vec<Campaign>,
}

impl Campaign {
    /// Maps an upstream [`StatsRecord`] to a [`Campaign`].
    ///
    /// Amounts which can't be coerced to a number become `0.0`
    /// and are only logged.
    pub fn from_stats(stats: &StatsRecord, logger: &Logger) -> Self {
        let coerce = |field: &'static str, amount: &Amount| match amount.to_f64() {
            Ok(number) => number,
            Err(AmountError::Unsupported(value)) => {
                debug!(logger, "Unsupported amount value, using 0"; "field" => field, "value" => %value, "campaign" => &stats.campaign);

                0.0
            }
            Err(error) => {
                warn!(logger, "Failed to parse amount, using 0"; "field" => field, "error" => %error, "campaign" => &stats.campaign);

                0.0
            }
        };

        Self {
            date: stats.date.clone(),
            campaign: stats.campaign.clone(),
            sign_ups: stats.sign_ups,
            ftd: stats.ftd.unwrap_or_default(),
            cpa: stats.cpa.unwrap_or_default(),
            deposits: coerce("deposits", &stats.deposits),
            clicks: 0,
            cpa_commission: 0.0,
            rev_share_commission: stats.rev_share_commission,
            total_commission: 0.0,
            ggr: coerce("ggr", &stats.ggr),
            bet: coerce("bet", &stats.bet),
            win: coerce("win", &stats.win),
            bonus: coerce("bonus", &stats.bonus),
            depo: coerce("depo", &stats.depo),
            withd: coerce("withd", &stats.withd),
            netrev: coerce("netrev", &stats.netrev),
        }
    }

    /// Maps every upstream result, keeping their order.
    pub fn from_response(response: &StatsResponse, logger: &Logger) -> CampaignsResponse {
        CampaignsResponse {
            data: response
                .results
                .iter()
                .map(|stats| Self::from_stats(stats, logger))
                .collect(),
        }
    }
}

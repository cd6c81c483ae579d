//! Session and bet requests against the remote game server.
//!
//! Every operation has two paths: a live path that POSTs to the RGS wallet
//! API, and a debug path that fabricates a response of the same shape. Debug
//! is selected by the launch params or by the absence of an `rgs_url`, so a
//! bare local launch always works offline.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use book_events::BookEvent;

use crate::debug::debug_play;
use crate::error::RgsError;
use crate::params::QueryParams;

/// Wire amounts are fixed-point with six decimal places.
pub const API_AMOUNT_MULTIPLIER: u64 = 1_000_000;

pub const DEFAULT_BET_LEVELS: [u64; 9] = [
    100_000,
    200_000,
    400_000,
    600_000,
    800_000,
    1_000_000,
    2_000_000,
    5_000_000,
    10_000_000,
];

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetConfig {
    pub min_bet: u64,
    pub max_bet: u64,
    pub step_bet: u64,
    pub default_bet_level: u64,
    pub bet_levels: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub balance: Balance,
    pub config: BetConfig,
    #[serde(default)]
    pub round: Option<serde_json::Value>,
}

/// The round half of a bet response. `state` stays as raw values so the
/// decode/normalize step runs at one boundary for live and debug rounds
/// alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRound {
    pub amount: u64,
    pub payout: u64,
    pub payout_multiplier: f64,
    pub active: bool,
    #[serde(default)]
    pub state: Vec<serde_json::Value>,
    pub mode: String,
    #[serde(default)]
    pub event: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetResponse {
    pub round: BetRound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

// ============================================================================
// Param validation
// ============================================================================

fn ensure_session_id(params: &QueryParams, debug_mode: bool) -> Result<String, RgsError> {
    match params.get_nonempty("sessionid") {
        Some(id) if id != "debug-session" => Ok(id.to_string()),
        Some(id) if debug_mode => Ok(id.to_string()),
        _ if debug_mode => Ok("debug-session".to_string()),
        _ => Err(RgsError::MissingParam("sessionID")),
    }
}

fn ensure_rgs_url(params: &QueryParams) -> Result<String, RgsError> {
    params
        .get_nonempty("rgs_url")
        .map(str::to_string)
        .ok_or(RgsError::MissingParam("rgs_url"))
}

fn ensure_language(params: &QueryParams) -> String {
    params
        .get_nonempty("lang")
        .map(str::to_string)
        .unwrap_or_else(|| "en".to_string())
}

fn ensure_currency(params: &QueryParams) -> String {
    params
        .get_nonempty("currency")
        .map(str::to_uppercase)
        .unwrap_or_else(|| "USD".to_string())
}

fn ensure_mode(params: &QueryParams) -> String {
    params
        .get_nonempty("mode")
        .map(str::to_uppercase)
        .unwrap_or_else(|| "BASE".to_string())
}

// ============================================================================
// Requests
// ============================================================================

pub struct RgsRequests {
    http: reqwest::Client,
    params: QueryParams,
}

impl RgsRequests {
    pub fn new(params: QueryParams) -> Self {
        Self {
            http: reqwest::Client::new(),
            params,
        }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Debug responses are used when explicitly requested or when no RGS
    /// endpoint is configured at all.
    pub fn should_use_debug(&self) -> bool {
        self.params.is_debug() || self.params.get_nonempty("rgs_url").is_none()
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, RgsError> {
        let rgs_url = ensure_rgs_url(&self.params)?;
        let url = format!("https://{rgs_url}{path}");
        debug!(%url, "rgs request");
        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(RgsError::Status {
                url,
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    pub async fn authenticate(&self) -> Result<AuthenticateResponse, RgsError> {
        let debug_mode = self.should_use_debug();
        let session_id = ensure_session_id(&self.params, debug_mode)?;
        let language = ensure_language(&self.params);

        if !debug_mode {
            return self
                .post(
                    "/wallet/authenticate",
                    json!({ "sessionID": session_id, "language": language }),
                )
                .await;
        }

        info!("authenticating against the debug synthesizer");
        Ok(AuthenticateResponse {
            balance: Balance {
                amount: 100_000_000,
                currency: "USD".to_string(),
            },
            config: BetConfig {
                min_bet: DEFAULT_BET_LEVELS[0],
                max_bet: DEFAULT_BET_LEVELS[DEFAULT_BET_LEVELS.len() - 1],
                step_bet: 100_000,
                default_bet_level: DEFAULT_BET_LEVELS[5],
                bet_levels: DEFAULT_BET_LEVELS.to_vec(),
            },
            round: None,
        })
    }

    pub async fn bet(&self, amount: Option<u64>) -> Result<BetResponse, RgsError> {
        let debug_mode = self.should_use_debug();
        let session_id = ensure_session_id(&self.params, debug_mode)?;
        let currency = ensure_currency(&self.params);
        let mode = ensure_mode(&self.params);
        let amount = amount.ok_or(RgsError::InvalidAmount)?;

        if !debug_mode {
            return self
                .post(
                    "/wallet/play",
                    json!({
                        "sessionID": session_id,
                        "currency": currency,
                        "mode": mode,
                        "amount": amount,
                    }),
                )
                .await;
        }

        let wire_amount = amount
            .checked_mul(API_AMOUNT_MULTIPLIER)
            .ok_or(RgsError::InvalidAmount)?;
        let envelope = debug_play(&self.params);
        let state = events_to_state(&envelope.round.events)?;
        Ok(BetResponse {
            round: BetRound {
                amount: wire_amount,
                payout: 0,
                payout_multiplier: 0.0,
                active: false,
                state,
                mode,
                event: None,
            },
        })
    }

    pub async fn end_round(&self) -> Result<AckResponse, RgsError> {
        let debug_mode = self.should_use_debug();
        let session_id = ensure_session_id(&self.params, debug_mode)?;

        if !debug_mode {
            return self
                .post("/wallet/end-round", json!({ "sessionID": session_id }))
                .await;
        }
        Ok(AckResponse { ok: true })
    }

    pub async fn end_event(&self, event_index: Option<u32>) -> Result<AckResponse, RgsError> {
        let debug_mode = self.should_use_debug();
        let session_id = ensure_session_id(&self.params, debug_mode)?;
        let event_index = event_index.ok_or(RgsError::InvalidEventIndex)?;

        if !debug_mode {
            return self
                .post(
                    "/wallet/end-event",
                    json!({ "sessionID": session_id, "eventIndex": event_index }),
                )
                .await;
        }
        Ok(AckResponse { ok: true })
    }
}

/// Serializes typed events back into the raw `state` list the live server
/// ships, so debug rounds pass through the same inbound decode.
fn events_to_state(events: &[BookEvent]) -> Result<Vec<serde_json::Value>, RgsError> {
    events
        .iter()
        .map(|event| serde_json::to_value(event).map_err(RgsError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_mode_requires_session_id() {
        let requests = RgsRequests::new(QueryParams::parse("rgs_url=rgs.example.com"));
        let err = requests.authenticate().await.unwrap_err();
        assert!(matches!(err, RgsError::MissingParam("sessionID")));
    }

    #[tokio::test]
    async fn missing_rgs_url_implies_debug() {
        let requests = RgsRequests::new(QueryParams::parse(""));
        assert!(requests.should_use_debug());
        let auth = requests.authenticate().await.unwrap();
        assert_eq!(auth.balance.amount, 100_000_000);
        assert_eq!(auth.config.default_bet_level, 1_000_000);
    }

    #[tokio::test]
    async fn debug_bet_round_mirrors_live_shape() {
        let requests =
            RgsRequests::new(QueryParams::parse("debug=1&scenario=bonus&bookId=1&mode=base"));
        let bet = requests.bet(Some(1)).await.unwrap();

        assert_eq!(bet.round.amount, API_AMOUNT_MULTIPLIER);
        assert_eq!(bet.round.payout, 0);
        assert!(!bet.round.active);
        assert_eq!(bet.round.mode, "BASE");
        assert!(bet.round.event.is_none());
        assert!(!bet.round.state.is_empty());

        // Every state entry carries a wire tag the decoder can dispatch on.
        for value in &bet.round.state {
            assert!(value.get("type").and_then(|t| t.as_str()).is_some());
        }
    }

    #[tokio::test]
    async fn bet_without_amount_is_rejected() {
        let requests = RgsRequests::new(QueryParams::parse("debug=1"));
        let err = requests.bet(None).await.unwrap_err();
        assert!(matches!(err, RgsError::InvalidAmount));
    }

    #[tokio::test]
    async fn bet_amount_overflowing_wire_units_is_rejected() {
        let requests = RgsRequests::new(QueryParams::parse("debug=1"));
        let err = requests.bet(Some(u64::MAX)).await.unwrap_err();
        assert!(matches!(err, RgsError::InvalidAmount));
    }

    #[tokio::test]
    async fn end_event_validates_index() {
        let requests = RgsRequests::new(QueryParams::parse("debug=1"));
        let err = requests.end_event(None).await.unwrap_err();
        assert!(matches!(err, RgsError::InvalidEventIndex));
        assert!(requests.end_event(Some(0)).await.unwrap().ok);
    }

    #[tokio::test]
    async fn debug_session_id_is_defaulted() {
        let requests = RgsRequests::new(QueryParams::parse("debug=1"));
        assert!(requests.end_round().await.unwrap().ok);
    }
}

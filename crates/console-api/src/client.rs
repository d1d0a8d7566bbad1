//! HTTP client for the remote console API.
//!
//! Two endpoints matter: `terminal_log` returns every entry strictly
//! after a cursor (in no particular order), and `execute` dispatches an
//! operator command. Both authenticate with an opaque token passed
//! through verbatim.

use crate::error::{ApiError, ApiResult};
use crate::negotiate::negotiate_base_url;
use console_protocol::RawLogEntry;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Per-request deadline. Exceeding it surfaces as [`ApiError::Timeout`],
/// which the poll scheduler retries on the next interval.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cursor value sent when the local log is empty. The remote treats it
/// as "from the beginning".
const CURSOR_NONE: i64 = 0;

/// Response body of the `terminal_log` endpoint.
#[derive(Debug, Deserialize)]
struct TerminalLogResponse {
    log_list: Vec<RawLogEntry>,
}

/// Request body of the `execute` endpoint.
#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    token: &'a str,
    cmd: &'a [String],
}

/// Client for the remote console's log and command endpoints.
#[derive(Clone, Debug)]
pub struct ConsoleClient {
    http: reqwest::Client,
    base: Url,
    token: String,
}

impl ConsoleClient {
    /// Resolves the configured URL (including scheme negotiation when no
    /// scheme is given) and builds a client against it.
    pub async fn connect(raw_url: &str, token: impl Into<String>) -> ApiResult<Self> {
        let base = negotiate_base_url(raw_url).await?;
        Self::with_base(base, token)
    }

    /// Builds a client against an already-resolved base URL.
    ///
    /// The base must end with a trailing slash; [`connect`](Self::connect)
    /// guarantees this.
    pub fn with_base(base: Url, token: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base,
            token: token.into(),
        })
    }

    /// The resolved base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetches every log entry strictly after the cursor.
    ///
    /// The returned batch is unordered and may be empty; the remote
    /// decides batch size. `None` asks for the log from the beginning.
    pub async fn fetch_since(&self, cursor: Option<i64>) -> ApiResult<Vec<RawLogEntry>> {
        let url = self.endpoint("terminal_log")?;
        let cursor_value = cursor.unwrap_or(CURSOR_NONE).to_string();
        let response = self
            .http
            .get(url.clone())
            .query(&[("token", self.token.as_str()), ("log_id", cursor_value.as_str())])
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(err, &url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::PathInvalid {
                url: self.base.to_string(),
            }),
            StatusCode::FORBIDDEN => Err(ApiError::AuthInvalid),
            status if !status.is_success() => Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
            }),
            _ => {
                let body: TerminalLogResponse = response
                    .json()
                    .await
                    .map_err(|err| ApiError::from_reqwest(err, &url))?;
                trace!(entries = body.log_list.len(), "fetched console batch");
                Ok(body.log_list)
            }
        }
    }

    /// Dispatches an operator command to the remote console.
    ///
    /// Fire-and-forget: the response status is logged but never
    /// interpreted. Only transport failures surface as errors.
    pub async fn execute(&self, cmd: &[String]) -> ApiResult<()> {
        let url = self.endpoint("execute")?;
        let response = self
            .http
            .post(url.clone())
            .json(&ExecuteRequest {
                token: &self.token,
                cmd,
            })
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(err, &url))?;
        debug!(status = response.status().as_u16(), "console command dispatched");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base.join(path).map_err(|source| ApiError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_log_response_decodes() {
        let json = r#"{
            "log_list": [
                {"log_id": 1, "time": 10.0, "text": "a", "color_text": "a"},
                {"log_id": 2, "text": "b", "color_text": "b"}
            ]
        }"#;
        let body: TerminalLogResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.log_list.len(), 2);
        assert_eq!(body.log_list[0].id, 1);
        assert_eq!(body.log_list[1].time, None);
    }

    #[test]
    fn execute_request_shape() {
        let cmd = vec!["say".to_string(), "hi".to_string()];
        let body = serde_json::to_value(ExecuteRequest {
            token: "secret",
            cmd: &cmd,
        })
        .unwrap();
        assert_eq!(body["token"], "secret");
        assert_eq!(body["cmd"][1], "hi");
    }

    #[test]
    fn endpoints_join_after_the_base_path() {
        let base = Url::parse("http://host:57317/api/").unwrap();
        let client = ConsoleClient::with_base(base, "t").unwrap();
        let url = client.endpoint("terminal_log").unwrap();
        assert_eq!(url.as_str(), "http://host:57317/api/terminal_log");
    }
}

//! Base URL scheme negotiation.
//!
//! Configurations may omit the scheme. In that case the secure scheme is
//! probed first with a bounded timeout; on timeout only, the client
//! falls back to plain http. Any other probe failure propagates, since
//! it usually means the host itself is wrong.

use crate::error::{ApiError, ApiResult};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Deadline for the https probe before falling back to http.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves the configured console URL into a normalized base [`Url`].
///
/// URLs carrying an explicit scheme are used as-is (no probe). The
/// returned URL always has a trailing slash so endpoint joins append
/// instead of replacing the last path segment.
pub async fn negotiate_base_url(raw: &str) -> ApiResult<Url> {
    if raw.contains("://") {
        return parse_base(raw);
    }

    let https = format!("https://{raw}");
    let base = parse_base(&https)?;
    debug!(url = %base, "probing secure scheme");
    match probe(&base).await {
        Ok(()) => Ok(base),
        Err(err) if err.is_timeout() => {
            info!(
                host = raw,
                "https probe timed out, falling back to http; pin a scheme in the config to skip this wait"
            );
            parse_base(&format!("http://{raw}"))
        }
        Err(err) => Err(ApiError::Transport(err)),
    }
}

/// Issues a single GET against the candidate base. Any response at all
/// counts as reachable; only transport errors matter here.
async fn probe(base: &Url) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
    client.get(base.clone()).send().await?;
    Ok(())
}

fn parse_base(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw).map_err(|source| ApiError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

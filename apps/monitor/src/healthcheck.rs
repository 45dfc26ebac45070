//! End-of-run liveness ping.

use std::time::Duration;
use tracing::{info, warn};

/// POST an empty body to the configured health-check URL. Fired once after
/// the wallet loop, regardless of per-wallet failures; a failed ping is
/// logged and nothing more.
pub async fn ping(url: &str) {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("failed to build health-check client: {e}");
            return;
        }
    };

    match client.post(url).send().await {
        Ok(response) if response.status().is_success() => {
            info!("health-check ping delivered");
        }
        Ok(response) => {
            warn!(status = %response.status(), "health-check ping rejected");
        }
        Err(e) => {
            warn!("health-check ping failed: {e}");
        }
    }
}

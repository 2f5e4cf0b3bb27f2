use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::time::Duration;
use ynab_core::Milliunits;

/// JSON body posted to the webhook after a push.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledNotice {
    /// Balance in milliunits
    pub reconciled: i64,
    /// Human-readable line, same as printed by `push`
    pub text: String,
}

impl ReconciledNotice {
    pub fn new(reconciled: Milliunits) -> Self {
        Self {
            reconciled: reconciled.value(),
            text: crate::push::reconciled_line(reconciled),
        }
    }
}

pub async fn notify(
    http: &reqwest::Client,
    url: &str,
    notice: &ReconciledNotice,
    timeout: Duration,
) -> Result<()> {
    tracing::debug!(%url, reconciled = notice.reconciled, "notifying webhook");

    let resp = http
        .post(url)
        .timeout(timeout)
        .json(notice)
        .send()
        .await
        .context("webhook request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("webhook error: {status} {txt}");
    }
    Ok(())
}

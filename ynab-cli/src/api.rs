//! Client for the budgeting API's bulk transaction endpoint.
//!
//! types available at https://api.ynab.com/v1#/Transactions/createTransaction

use anyhow::{Context, Result, bail};
use reqwest::header::AUTHORIZATION;
use std::time::Duration;
use ynab_core::{TransactionsPayload, TransactionsResponse};

pub struct YnabClient<'a> {
    http: &'a reqwest::Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

impl<'a> YnabClient<'a> {
    pub fn new(
        http: &'a reqwest::Client,
        base_url: &str,
        token: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            timeout,
        }
    }

    /// `POST /v1/budgets/{budget_id}/transactions`; one attempt, no retry.
    pub async fn create_transactions(
        &self,
        budget_id: &str,
        payload: &TransactionsPayload,
    ) -> Result<TransactionsResponse> {
        let url = format!("{}/v1/budgets/{}/transactions", self.base_url, budget_id);
        tracing::debug!(%url, count = payload.transactions.len(), "pushing transactions");

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .context("pushing transactions")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("pushing transactions: {status} - {txt}");
        }

        let out: TransactionsResponse = resp.json().await.context("parse transactions response")?;
        tracing::debug!(
            created = out.data.transaction_ids.len(),
            duplicates = out.duplicate_count(),
            "push accepted"
        );
        Ok(out)
    }
}

//! `push` and `convert` commands: read a statement, convert it, and hand the
//! result to the API and the optional webhook.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use ynab_core::{Milliunits, TransactionsPayload};
use ynab_ingest::{Conversion, Converter, Reconciled};

use crate::api::YnabClient;
use crate::config::Config;
use crate::webhook::{self, ReconciledNotice};

#[derive(Debug, Clone)]
pub struct PushArgs {
    pub file: PathBuf,
    pub budget_id: String,
    pub account_id: String,
    pub token: String,
    pub webhook: Option<String>,
    pub verbose: bool,
}

pub fn reconciled_line(amount: Milliunits) -> String {
    format!("reconciled: {amount}€")
}

pub fn read_statement(path: &Path, account_id: &str, namespace: &str) -> Result<Conversion> {
    let file = File::open(path).with_context(|| format!("opening file {}", path.display()))?;
    let conversion = Converter::new(account_id)
        .with_namespace(namespace)
        .convert(Some(file))
        .context("converting to YNAB transactions")?;

    if let Reconciled::Unparsable { raw } = &conversion.reconciled {
        tracing::warn!(%raw, file = %path.display(), "could not read the footer balance");
    }
    tracing::info!(
        count = conversion.len(),
        file = %path.display(),
        "converted statement"
    );
    Ok(conversion)
}

pub async fn run_push(
    args: &PushArgs,
    cfg: &Config,
    http: &reqwest::Client,
    out: &mut impl Write,
) -> Result<()> {
    let conversion = read_statement(&args.file, &args.account_id, &cfg.import.namespace)?;
    let reconciled = conversion.reconciled.amount();
    let payload = TransactionsPayload::new(conversion.transactions);

    if args.verbose {
        writeln!(out, "transactions:\n{}\n", serde_json::to_string_pretty(&payload)?)?;
    }
    writeln!(out, "{}", reconciled_line(reconciled))?;

    let duplicates = if payload.transactions.is_empty() {
        tracing::info!("no transactions in statement, skipping push");
        0
    } else {
        let client = YnabClient::new(http, &cfg.api.base_url, &args.token, cfg.api.timeout());
        client
            .create_transactions(&args.budget_id, &payload)
            .await
            .context("pushing to YNAB")?
            .duplicate_count()
    };

    writeln!(
        out,
        "successfully pushed {} transaction(s)",
        payload.transactions.len()
    )?;
    writeln!(out, "found {} duplicate(s)", duplicates)?;

    if let Some(url) = &args.webhook {
        webhook::notify(
            http,
            url,
            &ReconciledNotice::new(reconciled),
            cfg.webhook.timeout(),
        )
        .await
        .context("notifying webhook")?;
    }

    Ok(())
}

/// Dry run: print the request body that `push` would send.
pub fn run_convert(file: &Path, account_id: &str, cfg: &Config, out: &mut impl Write) -> Result<()> {
    let conversion = read_statement(file, account_id, &cfg.import.namespace)?;
    let reconciled = conversion.reconciled.amount();
    let payload = TransactionsPayload::new(conversion.transactions);

    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    writeln!(out, "{}", reconciled_line(reconciled))?;
    Ok(())
}

//! Exchange subcommands
//!
//! `send`, `retarget` and `goto` each open a session from a page address,
//! perform one exchange and print what the next request needs.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    SessionClient,
    cli::{CommonArgs, ConsoleNavigator, prepare},
    config::Settings,
    error::{format_error, format_error_for_logging, format_exchange_error_for_logging},
};

/// Arguments for `send`
#[derive(Debug)]
pub struct SendArgs {
    pub common: CommonArgs,
    pub page_url: String,
    pub data: Option<String>,
}

/// Arguments for `retarget` and `goto`
#[derive(Debug)]
pub struct RetargetArgs {
    pub common: CommonArgs,
    pub page_url: String,
    pub page_id: String,
    pub args: Option<String>,
}

fn open_session(page_url: &str, settings: &Settings) -> Result<SessionClient> {
    SessionClient::from_page_url(page_url, settings).map_err(|e| {
        debug!("{}", format_error_for_logging(&e));
        anyhow::anyhow!(format_error(&e))
    })
}

/// Post custom data and print the plugin's answer with the renewed page address
pub async fn run_send(args: SendArgs) -> Result<()> {
    let settings = prepare(&args.common)?;
    let payload: serde_json::Value = serde_json::from_str(args.data.as_deref().unwrap_or("null"))
        .context("--data is not valid JSON")?;

    let client = open_session(&args.page_url, &settings)?;
    debug!("Sending custom data as {:?}", client.identity());

    match client.send(payload).await {
        Ok(custom_data) => {
            let output = serde_json::json!({
                "custom_data": custom_data,
                "page_url": client.page_url()?.to_string(),
            });
            println!("{}", serde_json::to_string(&output)?);
            Ok(())
        }
        Err(e) => {
            debug!("{}", format_exchange_error_for_logging(&e));
            eprintln!("Failed while sending custom data. Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Retarget the session and print the new page address
pub async fn run_retarget(args: RetargetArgs) -> Result<()> {
    let settings = prepare(&args.common)?;
    let client = open_session(&args.page_url, &settings)?;

    match client.retarget(&args.page_id).await {
        Ok(()) => {
            info!("Session now on page {}", client.page_id());
            println!("{}", client.page_url()?);
            Ok(())
        }
        Err(e) => {
            debug!("{}", format_exchange_error_for_logging(&e));
            eprintln!("Failed while retargeting. Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Navigate to a page, printing its address or alerting the failure
pub async fn run_goto(args: RetargetArgs) -> Result<()> {
    let settings = prepare(&args.common)?;
    let client = open_session(&args.page_url, &settings)?.with_navigator(ConsoleNavigator);

    // The navigator already printed the outcome
    if client
        .navigate_to(&args.page_id, args.args.as_deref())
        .await
        .is_err()
    {
        std::process::exit(1);
    }

    Ok(())
}

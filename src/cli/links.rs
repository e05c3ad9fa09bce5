//! `links` subcommand
//!
//! Lists the goto anchors a page template would wire.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{
    LinkTable,
    cli::{CommonArgs, prepare},
};

/// Arguments for `links`
#[derive(Debug)]
pub struct LinksArgs {
    pub common: CommonArgs,
    pub html_file: PathBuf,
    pub json: bool,
}

/// Print the wired anchors of an HTML file
pub async fn run_links(args: LinksArgs) -> Result<()> {
    prepare(&args.common)?;

    let html = tokio::fs::read_to_string(&args.html_file)
        .await
        .with_context(|| format!("Failed to read {}", args.html_file.display()))?;
    let table = LinkTable::wire(&html)?;

    if args.json {
        let links: Vec<serde_json::Value> = table
            .links()
            .iter()
            .map(|link| {
                serde_json::json!({
                    "page_id": link.page_id,
                    "args": link.args,
                    "text": link.text,
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&links)?);
    } else {
        for link in table.links() {
            match &link.args {
                Some(query) => println!("{}?{}\t{}", link.page_id, query, link.text),
                None => println!("{}\t{}", link.page_id, link.text),
            }
        }
    }

    Ok(())
}

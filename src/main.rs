//! Command-line client for MOTDPlayer pages
//!
//! Performs the exchanges of a MOTD page session from a terminal.
//!
//! # Usage
//!
//! ## Send custom data
//! ```bash
//! motdplayer send --page-url "http://motd.example.com/srv/shop/main/765/1/token/42/" --data '{"x":1}'
//! ```
//!
//! ## Move the session to another page
//! ```bash
//! motdplayer retarget --page-url "http://motd.example.com/srv/shop/main/765/2/token/42/" checkout
//! motdplayer goto --page-url "http://motd.example.com/srv/shop/main/765/2/token/42/" checkout --args "item=3"
//! ```
//!
//! ## List the goto links of a page
//! ```bash
//! motdplayer links page.html
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use motdplayer_client::cli::{
    CommonArgs,
    exchange::{RetargetArgs, SendArgs, run_goto, run_retarget, run_send},
    links::{LinksArgs, run_links},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "motdplayer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// CSRF token sent with every exchange (overrides configuration)
    #[arg(long, global = true, value_name = "TOKEN")]
    csrf_token: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send custom data to the page's plugin
    Send {
        /// Address of the current MOTD page
        #[arg(long, value_name = "URL")]
        page_url: String,

        /// JSON payload (defaults to null)
        #[arg(short, long, value_name = "JSON", allow_hyphen_values = true)]
        data: Option<String>,
    },

    /// Re-authenticate the session against another page
    Retarget {
        /// Address of the current MOTD page
        #[arg(long, value_name = "URL")]
        page_url: String,

        /// Destination page
        #[arg(value_name = "PAGE_ID")]
        page_id: String,
    },

    /// Retarget and print the destination address
    Goto {
        /// Address of the current MOTD page
        #[arg(long, value_name = "URL")]
        page_url: String,

        /// Destination page
        #[arg(value_name = "PAGE_ID")]
        page_id: String,

        /// Query string appended to the destination
        #[arg(long, value_name = "ARGS")]
        args: Option<String>,
    },

    /// List the goto links of an HTML page
    Links {
        /// Page to scan
        #[arg(value_name = "HTML_FILE")]
        html_file: PathBuf,

        /// Print links as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let common = CommonArgs {
        config: cli.config,
        csrf_token: cli.csrf_token,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Send { page_url, data } => {
            run_send(SendArgs {
                common,
                page_url,
                data,
            })
            .await
        }
        Commands::Retarget { page_url, page_id } => {
            run_retarget(RetargetArgs {
                common,
                page_url,
                page_id,
                args: None,
            })
            .await
        }
        Commands::Goto {
            page_url,
            page_id,
            args,
        } => {
            run_goto(RetargetArgs {
                common,
                page_url,
                page_id,
                args,
            })
            .await
        }
        Commands::Links { html_file, json } => {
            run_links(LinksArgs {
                common,
                html_file,
                json,
            })
            .await
        }
    }
}

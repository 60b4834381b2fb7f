//! Deck Builder - Commander deck assembly and validation
//!
//! Resolves a CSV card list on Scryfall, checks Commander rules and writes
//! `<prefix>.txt` and `<prefix>.json`.

use clap::Parser;
use deck_builder::{
    build_deck, format_summary, read_card_requests, write_outputs, DeckError, PipelineOptions,
    Summary,
};
use mtg_common::{ScryfallClient, ScryfallConfig, DEFAULT_API_URL};
use std::path::PathBuf;
use std::time::Duration;

const EXIT_SUCCESS: i32 = 0;
/// Exit code for --strict runs whose report contains errors
const EXIT_STRICT_FAILURE: i32 = 1;
/// Exit code for unrecoverable errors (unreadable CSV, unwritable output)
const EXIT_FATAL: i32 = 2;

/// Commander (EDH) deck builder and validator using the Scryfall API
#[derive(Parser, Debug)]
#[command(name = "deck_builder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the card list CSV (requires a "Card name" column)
    #[arg(long)]
    csv: PathBuf,

    /// Output file prefix (writes <prefix>.txt and <prefix>.json)
    #[arg(long, default_value = "deck_output")]
    out_prefix: PathBuf,

    /// Commander name(s); give two names for partners
    #[arg(long, num_args = 1..)]
    commander: Vec<String>,

    /// Scryfall API base URL
    #[arg(long, env = "SCRYFALL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pause between Scryfall requests in milliseconds
    #[arg(long, default_value_t = 100)]
    request_delay_ms: u64,

    /// Exit with code 1 when the deck has rule violations or unresolved cards
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=deck_builder=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let strict = args.strict;

    let outcome = run(args).await;
    match &outcome {
        Ok(summary) if strict && !summary.legal => {
            log::warn!("Strict mode: deck has {} error(s)", summary.errors);
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {e}");
        }
    }
    std::process::exit(exit_code(&outcome, strict));
}

/// Process exit code for a finished run
fn exit_code(outcome: &Result<Summary, DeckError>, strict: bool) -> i32 {
    match outcome {
        Err(_) => EXIT_FATAL,
        Ok(summary) if strict && !summary.legal => EXIT_STRICT_FAILURE,
        Ok(_) => EXIT_SUCCESS,
    }
}

async fn run(args: Args) -> Result<Summary, DeckError> {
    log::info!("Starting deck_builder...");

    let load = read_card_requests(&args.csv)?;

    let client = ScryfallClient::new(ScryfallConfig {
        base_url: args.api_url,
        timeout: Duration::from_secs(args.timeout_secs),
        ..ScryfallConfig::default()
    })?;

    let options = PipelineOptions {
        commanders: args.commander,
        request_delay: Duration::from_millis(args.request_delay_ms),
    };
    let build = build_deck(&client, load, &options).await;

    let paths = write_outputs(&build.deck, &build.report, &args.out_prefix)?;
    print!("{}", format_summary(&build.report, &paths));

    Ok(build.report.summary)
}

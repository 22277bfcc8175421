//! NLP Tutor - Text and Speech Analysis Chatbot
//!
//! Line-oriented front end: one line in, one reply out.

use anyhow::{Context, Result};
use clap::Parser;
use nlp_tutor::config::Config;
use nlp_tutor::matcher::MatchMode;
use nlp_tutor::transcript::Transcript;
use nlp_tutor::{Session, TutorError};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for supportive phrase selection
    #[arg(long)]
    seed: Option<u64>,

    /// How answers are graded
    #[arg(long, value_enum)]
    match_mode: Option<MatchMode>,

    /// Do not write a transcript
    #[arg(long)]
    no_transcript: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    // Setup logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(config.log_directive(args.verbose, rust_log.as_deref()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🎓 NLP Tutor v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(seed) = args.seed {
        config.rng_seed = Some(seed);
    }
    if let Some(mode) = args.match_mode {
        config.match_mode = mode;
    }
    if args.no_transcript {
        config.transcript_enabled = false;
    }

    let mut tutor = config.build_tutor().context("Failed to initialize tutor")?;
    let transcript = config
        .transcript_enabled
        .then(|| Transcript::new(config.transcript_file()));
    if let Some(t) = &transcript {
        info!("📝 Transcript: {:?}", t.path());
    }

    let mut session = Session::new();

    println!("Chatbot: Hello! Type 'teach me the basics' to begin, or 'quit' to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        let reply = match tutor.respond(&mut session, message) {
            Ok(reply) => reply,
            Err(e @ TutorError::UnknownConceptKey(_)) => {
                error!("❌ {}", e);
                "Let's start over. Type 'teach me the basics' to see the concepts.".to_string()
            }
            Err(e) => return Err(e.into()),
        };
        debug!("State after message: {:?}", session.state());

        println!("Chatbot: {}\n", reply);

        if let Some(t) = &transcript {
            if let Err(e) = t.record(message, &reply) {
                warn!("⚠️ Could not write transcript: {}", e);
            }
        }
    }

    info!("👋 Goodbye");
    Ok(())
}

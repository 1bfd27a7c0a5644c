//! CLI administration tool for wordlink.
//!
//! Inspects and edits the link tables directly, without going through the
//! HTTP API (and therefore without rate limits or the shared secret).
//!
//! # Usage
//!
//! ```bash
//! # Check store connection
//! cargo run --bin admin -- store check
//!
//! # Show where a code points
//! cargo run --bin admin -- resolve bluecat
//!
//! # Show the generated code of a long URL
//! cargo run --bin admin -- lookup https://example.com/some/page
//!
//! # Register a custom alias (prompts for missing values)
//! cargo run --bin admin -- alias spring-sale https://example.com/sale
//!
//! # Inspect word lists before deploying them
//! cargo run --bin admin -- corpus words/adjectives.txt words/animals.txt
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`
//! - `WORD_FILES`, `BASE_URL` (only for `alias`)
//!
//! # Features
//!
//! - **Lookups**: Resolve codes and long URLs against every table
//! - **Alias Registration**: Same validation and conflict rules as `/customshorten`
//! - **Corpus Inspection**: Word counts and resulting code space
//! - **Interactive Prompts**: Confirmation before writing
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use wordlink::config::{self, Config, mask_connection_string};
use wordlink::domain::entities::{Table, code_space};
use wordlink::domain::repositories::KeyValueStore;
use wordlink::infrastructure::store::{self, MEMORY_STORE_URL};
use wordlink::infrastructure::wordlist::load_corpora;
use wordlink::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing wordlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Show the long URL behind a code
    Resolve {
        /// Generated code or custom alias
        code: String,
    },

    /// Show the generated code of a long URL
    Lookup {
        /// The original long URL
        longurl: String,
    },

    /// Register a custom alias
    Alias {
        /// Alias to register (prompted if omitted)
        code: Option<String>,

        /// Target URL (prompted if omitted)
        longurl: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show word counts and code space of word lists
    Corpus {
        /// Word list files, in code order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Store { action } => handle_store_action(action).await?,
        Commands::Resolve { code } => resolve(&code).await?,
        Commands::Lookup { longurl } => lookup(&longurl).await?,
        Commands::Alias { code, longurl, yes } => register_alias(code, longurl, yes).await?,
        Commands::Corpus { files } => inspect_corpora(&files).await?,
    }

    Ok(())
}

/// Opens the store named by the environment.
async fn open_links() -> Result<Arc<dyn KeyValueStore>> {
    let url = Config::load_redis_url();

    if url.starts_with(MEMORY_STORE_URL) {
        println!(
            "{}",
            "⚠️  memory:// store is empty in a fresh process".yellow()
        );
    }

    let handles = store::open(&url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&url)))?;

    Ok(handles.links)
}

/// Handles store diagnostic commands.
async fn handle_store_action(action: StoreAction) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            let links = open_links().await?;
            if !links.health_check().await {
                anyhow::bail!("Store did not answer PING");
            }

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}

/// Looks a code up in the generated table, then in the custom table.
async fn resolve(code: &str) -> Result<()> {
    let links = open_links().await?;

    for table in [Table::ShortToLong, Table::CustomToLong] {
        if let Some(long_url) = links.get(table, code).await? {
            println!(
                "  {} → {}  {}",
                code.cyan(),
                long_url.bright_white(),
                format!("({})", table).bright_black()
            );
            return Ok(());
        }
    }

    println!("{}", format!("❌ No link for code '{}'", code).red());
    Ok(())
}

/// Looks up the generated code of a long URL.
///
/// Custom aliases have no reverse entry and are not found this way.
async fn lookup(long_url: &str) -> Result<()> {
    let links = open_links().await?;

    match links.get(Table::LongToShort, long_url).await? {
        Some(code) => println!("  {} → {}", long_url.bright_white(), code.cyan()),
        None => println!("{}", "❌ URL has no generated code".red()),
    }

    Ok(())
}

/// Registers a custom alias with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for alias and target (or use provided)
/// 2. Display details
/// 3. Confirm (unless `--yes` flag)
/// 4. Register through the link service (same checks as `/customshorten`)
async fn register_alias(code: Option<String>, long_url: Option<String>, yes: bool) -> Result<()> {
    println!("{}", "🔗 Register Custom Alias".bright_blue().bold());
    println!();

    let config = config::load_from_env()?;

    let code = match code {
        Some(c) => c,
        None => Input::new().with_prompt("Alias").interact_text()?,
    };

    let long_url = match long_url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    println!();
    println!("  Alias:  {}", code.cyan());
    println!("  Target: {}", long_url.bright_white());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Register this alias?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let stores = server::connect_store(&config).await?;
    let state = server::build_state(&config, stores).await?;

    let link = state
        .link_service
        .custom_shorten(&long_url, &code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register alias: {}", e))?;

    println!(
        "{}",
        "✅ Alias registered successfully!".green().bold()
    );
    println!(
        "  {}",
        state.link_service.short_url(&link.code).bright_yellow()
    );
    println!();

    Ok(())
}

/// Prints each word list's size and the resulting number of codes.
async fn inspect_corpora(files: &[PathBuf]) -> Result<()> {
    println!("{}", "📚 Word Lists".bright_blue().bold());
    println!();

    let corpora = load_corpora(files)
        .await
        .context("Failed to load word lists")?;

    for corpus in &corpora {
        println!(
            "  {:<40} {} words",
            corpus.name().cyan(),
            corpus.len().to_string().bright_white().bold()
        );
    }

    println!();
    println!(
        "  Code space: {}",
        code_space(&corpora).to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

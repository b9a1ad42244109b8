use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "mintwarden",
    version,
    about = "Calm trust verdicts for Solana tokens"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Verify, classify and score a token
    Analyze {
        #[command(flatten)]
        evidence: EvidenceArgs,
        /// Evaluation time in RFC 3339; defaults to now
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        save: Option<PathBuf>,
        /// Save the report under the data directory
        #[arg(long)]
        store: bool,
    },
    /// Registry verification only
    Verify {
        #[command(flatten)]
        evidence: EvidenceArgs,
        #[arg(long)]
        json: bool,
    },
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        timeline: bool,
    },
    Config {
        #[arg(long)]
        print: bool,
    },
}

#[derive(Args, Debug)]
struct EvidenceArgs {
    /// Evidence bundle JSON, or a directory of per-source evidence files
    #[arg(long)]
    input: PathBuf,
    /// Mint address; required when --input is a directory
    #[arg(long)]
    mint: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    symbol: Option<String>,
    /// Per-collector timeout for evidence directories
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl From<EvidenceArgs> for commands::EvidenceInput {
    fn from(args: EvidenceArgs) -> Self {
        commands::EvidenceInput {
            input: args.input,
            mint: args.mint,
            name: args.name,
            symbol: args.symbol,
            timeout_secs: args.timeout_secs,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, force } => init_config(path, force),
        Commands::Analyze {
            evidence,
            now,
            json,
            save,
            store,
        } => commands::analyze::execute(commands::analyze::AnalyzeInputs {
            config_path: cli.config,
            evidence: evidence.into(),
            now,
            json,
            save,
            store,
        }),
        Commands::Verify { evidence, json } => {
            commands::verify::execute(cli.config, evidence.into(), json)
        }
        Commands::Report {
            input,
            json,
            timeline,
        } => commands::report::execute(&input, json, timeline),
        Commands::Config { print } => {
            if print {
                commands::config::print_effective(cli.config)
            } else {
                Ok(())
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let paths = mintwarden_core::config::ConfigPaths::resolve()?;
    let config_path = path.unwrap_or(paths.config_path);
    if config_path.exists() && !force {
        return Err(anyhow::anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }
    let config = mintwarden_core::config::Config::default_config();
    config.save(&config_path)?;
    println!("Config written to {}", config_path.display());
    Ok(())
}

//! gbp-score: Google Business Profile scoring and recommendations.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use gbp_score::{
    cli::{self, AnalyseOptions, OnboardOptions},
    config::{self, AppConfig, ConfigPreset, Validatable, CONFIG_FILE_NAMES},
    onboarding::PaymentPlan,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gbp-score")]
#[command(author = "Tribly")]
#[command(version)]
#[command(about = "Google Business Profile health scoring and recommendations", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Score below --min-score / place or session not found
    2  Onboarding payment declined
    3  Error occurred

EXAMPLES:
    # Score a business and print a summary
    gbp-score analyse \"Cafe Nova\"

    # Reproducible JSON output for CI
    gbp-score --preset ci-cd analyse \"Cafe Nova\" --seed 7 --min-score 60

    # Look up a place
    gbp-score autocomplete tanishq
    gbp-score details mock_place_1

    # Serve the HTTP API
    gbp-score serve --port 8080")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset applied under the config file (default, demo, ci-cd)
    #[arg(long, global = true)]
    preset: Option<String>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `analyse` subcommand
#[derive(Parser)]
struct AnalyseArgs {
    /// Business name
    business: String,

    /// Business phone number, stored with the session handoff
    #[arg(long, default_value = "")]
    phone: String,

    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Seed the simulated metrics for reproducible scores
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated acquisition latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Maximum action items to show
    #[arg(long)]
    max_items: Option<usize>,

    /// Fail if the overall score is below threshold (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Do not store the result for `session show`
    #[arg(long)]
    no_save: bool,
}

/// Arguments for the `onboard` subcommand
#[derive(Parser)]
struct OnboardArgs {
    /// Business name
    business: String,

    /// Business phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Subscription plan
    #[arg(long, value_enum, default_value = "qr-basic")]
    plan: PaymentPlan,

    /// Contact email (prefilled from the business name if omitted)
    #[arg(long)]
    email: Option<String>,

    /// Seed the simulated metrics and payment outcome
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a business profile and list improvement actions
    Analyse(AnalyseArgs),

    /// Suggest places for a partial business name
    Autocomplete {
        /// Partial business name or address
        query: String,
    },

    /// Show details for a place id
    Details {
        /// Place id from `autocomplete`
        place_id: String,
    },

    /// Show or clear the stored analysis
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Build the report link and WhatsApp message for a business owner
    Connect {
        /// Business name
        business: String,

        /// Business phone number (digits are used for the WhatsApp link)
        #[arg(long)]
        phone: String,
    },

    /// Run the onboarding flow: analyse, prefill details, pay
    Onboard(OnboardArgs),

    /// Serve the HTTP API
    #[cfg(feature = "server")]
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Render the stored analysis
    Show,
    /// Remove the stored analysis
    Clear,
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from preset + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .gbp-score.yaml in the current directory
    Init,
}

/// Effective configuration: preset, then config file, then global flags.
fn load_config(cli: &Cli) -> Result<(AppConfig, Option<PathBuf>)> {
    let mut config = match &cli.preset {
        Some(name) => {
            let Some(preset) = ConfigPreset::from_name(name) else {
                let valid: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                bail!("Unknown preset: {name}. Valid options: {}", valid.join(", "));
            };
            AppConfig::from_preset(preset)
        }
        None => AppConfig::default(),
    };

    let (file_config, loaded_from) = config::load_or_default(cli.config.as_deref());
    config.merge(&file_config);

    if cli.no_color {
        config.output.no_color = true;
    }
    if cli.output_file.is_some() {
        config.output.file.clone_from(&cli.output_file);
    }
    Ok((config, loaded_from))
}

fn validate(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("Invalid configuration: {error}");
    }
    bail!("configuration has {} error(s)", errors.len());
}

fn exit_with(code: i32) -> Result<()> {
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let (mut config, loaded_from) = load_config(&cli)?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    match cli.command {
        Commands::Analyse(args) => {
            if let Some(format) = args.output {
                config.output.format = format;
            }
            if args.seed.is_some() {
                config.analysis.seed = args.seed;
            }
            if let Some(latency) = args.latency_ms {
                config.analysis.latency_ms = latency;
            }
            if args.max_items.is_some() {
                config.output.max_items = args.max_items;
            }
            validate(&config)?;

            let code = cli::run_analyse(
                &config,
                AnalyseOptions {
                    business: args.business,
                    phone: args.phone,
                    min_score: args.min_score,
                    no_save: args.no_save,
                    quiet: cli.quiet,
                },
            )?;
            exit_with(code)
        }

        Commands::Autocomplete { query } => {
            validate(&config)?;
            exit_with(cli::run_autocomplete(&config, &query, cli.quiet)?)
        }

        Commands::Details { place_id } => {
            validate(&config)?;
            exit_with(cli::run_details(&config, &place_id, cli.quiet)?)
        }

        Commands::Session { action } => {
            let code = match action {
                SessionAction::Show => cli::run_session_show(&config, cli.quiet)?,
                SessionAction::Clear => cli::run_session_clear(&config, cli.quiet)?,
            };
            exit_with(code)
        }

        Commands::Connect { business, phone } => {
            validate(&config)?;
            exit_with(cli::run_connect(&config, &business, &phone, cli.quiet)?)
        }

        Commands::Onboard(args) => {
            if args.seed.is_some() {
                config.analysis.seed = args.seed;
            }
            validate(&config)?;

            let code = cli::run_onboard(
                &config,
                OnboardOptions {
                    business: args.business,
                    phone: args.phone,
                    plan: args.plan,
                    email: args.email,
                    quiet: cli.quiet,
                },
            )?;
            exit_with(code)
        }

        #[cfg(feature = "server")]
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            validate(&config)?;
            exit_with(cli::run_serve(&config)?)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "gbp-score", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("gbp-score").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".gbp-score.yaml");
                if target.exists() {
                    bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

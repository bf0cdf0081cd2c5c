//! `e2e-config`: inspect and check vSphere CSI e2e test configuration files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use e2e_config::config::{
    load_config, load_config_from_env, validate_config, ConfigError, E2eTestConfig, ReadOptions,
};
use e2e_config::observability::init_logging;

#[derive(Parser)]
#[command(name = "e2e-config")]
#[command(about = "Check and print vSphere CSI e2e test configuration", long_about = None)]
struct Cli {
    /// Reject unknown sections and keys.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a config file
    Check {
        /// Config file (defaults to $E2E_TEST_CONF_FILE)
        file: Option<PathBuf>,
    },
    /// Print the parsed configuration
    Show {
        /// Config file (defaults to $E2E_TEST_CONF_FILE)
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Print passwords instead of a placeholder
        #[arg(long)]
        reveal_secrets: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn main() -> ExitCode {
    init_logging("e2e_config=info");
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = ReadOptions { strict: cli.strict };

    match cli.command {
        Commands::Check { file } => {
            let config = load(file.as_deref(), &options)?;
            if let Err(errors) = validate_config(&config) {
                for err in &errors {
                    eprintln!("invalid: {}", err);
                }
                return Ok(ExitCode::FAILURE);
            }
            println!("OK");
        }
        Commands::Show {
            file,
            format,
            reveal_secrets,
        } => {
            let mut config = load(file.as_deref(), &options)?;
            if !reveal_secrets {
                config = config.redacted();
            }
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&config)?,
                Format::Toml => toml::to_string_pretty(&config)?,
            };
            println!("{}", rendered);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(file: Option<&Path>, options: &ReadOptions) -> Result<E2eTestConfig, ConfigError> {
    match file {
        Some(path) => load_config(path, options),
        None => load_config_from_env(options),
    }
}

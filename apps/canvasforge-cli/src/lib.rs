//! Command-line front end: reads a JSON request, prints a JSON envelope.
//!
//! Stdout carries only JSON. Logs go to stderr through `env_logger`.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use canvasforge_io::{parse_generator_response, tools, Dispatcher, EngineConfig, Envelope};

pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for an error envelope. I/O failures exit with 1.
pub const EXIT_ERROR_ENVELOPE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "canvasforge")]
#[command(about = "CanvasForge - shape collection transformation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Engine configuration file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute one operation request
    Run {
        /// JSON request payload
        #[arg(short, long, conflicts_with = "file")]
        payload: Option<String>,

        /// Read the request from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List available operations
    Tools,

    /// Validate and normalize a raw shape generator response
    Normalize {
        /// Read the response from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn read_input(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn render(value: &serde_json::Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

pub fn exit_code(envelope: &Envelope) -> u8 {
    if envelope.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_ERROR_ENVELOPE
    }
}

/// Handle one raw request with `config`.
pub fn run_request(config: EngineConfig, raw: &str) -> Envelope {
    Dispatcher::new(config).handle_json(raw)
}

/// Parse a raw generator response into a shapes envelope.
pub fn normalize_response(raw: &str) -> Envelope {
    let result = parse_generator_response(raw).and_then(|shapes| {
        Envelope::success(
            Some(format!("Normalized {} shapes", shapes.len())),
            serde_json::json!({ "shapes": shapes }),
        )
    });
    match result {
        Ok(envelope) => envelope,
        Err(e) => {
            log::error!("Generator response rejected: {}", e);
            Envelope::failure(&e)
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                eprintln!(r#"{{"error": "Failed to load configuration: {}"}}"#, e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    let envelope = match cli.command {
        Commands::Tools => {
            let listing = serde_json::json!({ "tools": tools() });
            println!("{}", render(&listing, cli.pretty));
            return ExitCode::SUCCESS;
        }
        Commands::Run { payload, file } => {
            let raw = match payload {
                Some(payload) => payload,
                None => match read_input(file.as_deref()) {
                    Ok(raw) => raw,
                    Err(e) => {
                        log::error!("Failed to read request: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
            };
            run_request(config, &raw)
        }
        Commands::Normalize { file } => match read_input(file.as_deref()) {
            Ok(raw) => normalize_response(&raw),
            Err(e) => {
                log::error!("Failed to read generator response: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let code = exit_code(&envelope);
    println!("{}", render(&envelope.into_value(), cli.pretty));
    ExitCode::from(code)
}

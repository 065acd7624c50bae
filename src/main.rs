mod api;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod lookups;
mod model;
mod session;
mod ui;
mod workers;

use crate::api::{CampusApi, CampusClient};
use crate::config::{Config, Settings, get_config_path};
use crate::consts::cli_consts::{campus, messages};
use crate::environment::{ENVIRONMENT_VAR, Environment};
use crate::logging::LogLevel;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::workers::view::Section;
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Backend base URL, or "local" for http://localhost:8000
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the terminal dashboard
    Start {
        /// Print dashboard snapshots and events to stdout instead of the TUI
        #[arg(long, default_value = "false")]
        headless: bool,

        /// Dashboard refresh period in milliseconds
        #[arg(long, value_name = "MILLIS")]
        poll_interval_ms: Option<u64>,

        /// Paint the dark background behind the TUI
        #[arg(long, default_value = "false")]
        with_background: bool,
    },
    /// Where the current class is held
    Status,
    /// Attendance of one student
    Attendance {
        /// Roster identifier, S01 to S30
        #[arg(long, value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// Where a teacher is right now
    Locate {
        #[arg(long, value_name = "NAME", value_parser = clap::builder::PossibleValuesParser::new(campus::TEACHERS))]
        teacher: String,
    },
    /// Ask the admin bot a question
    Chat {
        #[arg(long)]
        message: String,
    },
    /// Save the backend URL (--api-url) and poll interval to the config file
    Configure {
        #[arg(long, value_name = "MILLIS")]
        poll_interval_ms: Option<u64>,
    },
    /// Delete the config file
    ClearConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;

    match args.command {
        Command::Configure { poll_interval_ms } => {
            let saved = Config::load_or_default(&config_path)?;
            if let Some(raw) = &args.api_url {
                // Reject what could never be resolved later
                raw.parse::<Environment>()?;
            }
            let config = Config::new(
                args.api_url.or(saved.api_url),
                poll_interval_ms.or(saved.poll_interval_ms),
            );
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Configuration saved", "{}", config_path.display());
            Ok(())
        }
        Command::ClearConfig => {
            println!("Clearing configuration file...");
            Config::clear(&config_path).map_err(Into::into)
        }
        command => {
            let config = Config::load_or_default(&config_path)?;
            let env_api_url = std::env::var(ENVIRONMENT_VAR).ok();
            let flag_interval = match &command {
                Command::Start {
                    poll_interval_ms, ..
                } => *poll_interval_ms,
                _ => None,
            };
            let settings = config.resolve(
                args.api_url.as_deref(),
                env_api_url.as_deref(),
                flag_interval,
            )?;
            run_command(command, settings).await
        }
    }
}

/// Runs a command that talks to the backend.
async fn run_command(command: Command, settings: Settings) -> Result<(), Box<dyn Error>> {
    if let Command::Start {
        headless,
        with_background,
        ..
    } = command
    {
        return if headless {
            let session = setup_session(settings, Section::Admin)?;
            run_headless_mode(session).await
        } else {
            let session = setup_session(settings, Section::default())?;
            run_tui_mode(session, with_background).await
        };
    }

    let client = CampusClient::new(settings.environment)?;
    if logging::should_log_with_env(LogLevel::Debug) {
        print_cmd_info!("Backend", "{}", client.environment());
    }

    match command {
        Command::Status => {
            let location = lookups::check_class_location(&client)
                .await
                .inspect_err(|e| print_cmd_error!(messages::FETCH_ERROR, &e.to_string()))?;
            print_cmd_info!("Class", "{}", location);
        }
        Command::Attendance { student_id } => {
            let summary = lookups::check_attendance(&client, &student_id)
                .await
                .inspect_err(|e| print_cmd_error!(messages::FETCH_ERROR, &e.to_string()))?;
            print_cmd_info!("Attendance", "{}: {}", student_id, summary);
        }
        Command::Locate { teacher } => {
            let location = lookups::locate_teacher(&client, &teacher)
                .await
                .inspect_err(|e| print_cmd_error!(messages::FETCH_ERROR, &e.to_string()))?;
            print_cmd_info!("Teacher", "{}: {}", teacher, location);
        }
        Command::Chat { message } => {
            let Some(message) = lookups::prepare_chat_message(&message) else {
                print_cmd_warn!("Chat", "Nothing to send");
                return Ok(());
            };
            let (reply, error) = lookups::chat_reply(&client, message).await;
            if let Some(e) = error {
                print_cmd_error!(&reply, &e.to_string());
                return Err(e.into());
            }
            print_cmd_info!("Bot", "{}", reply);
        }
        Command::Start { .. } | Command::Configure { .. } | Command::ClearConfig => {}
    }
    Ok(())
}

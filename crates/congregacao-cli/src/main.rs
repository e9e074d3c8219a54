// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Congregação CLI - administration client for churches, congregations and
//! user profiles.
//!
//! Signs in against the backend, keeps the session in a local file and
//! refreshes it transparently while commands run.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use congregacao_config::{load_config, CliOverrides, LogFormat, LogLevel, LoggingConfig};

mod commands;
mod locale;
mod ui;

use commands::{App, Reported};

/// Congregação - church and congregation administration
#[derive(Parser, Debug)]
#[command(name = "congregacao", version, about, long_about = None)]
struct Args {
	/// Path to a configuration file (used instead of the user config file)
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Backend URL (overrides CONGREGACAO_API_URL and the config file)
	#[arg(long)]
	api_url: Option<String>,

	/// Where the session is stored
	#[arg(long)]
	session_file: Option<PathBuf>,

	/// Message language: pt-BR or en
	#[arg(long)]
	locale: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign in and store the session
	Login {
		#[arg(long)]
		email: String,
		/// Read from stdin when omitted
		#[arg(long)]
		password: Option<String>,
	},
	/// Sign out and forget the session
	Logout,
	/// Show the signed-in user
	Whoami,
	/// Manage churches
	Churches {
		#[command(subcommand)]
		command: ChurchCommand,
	},
	/// Manage local congregations
	Commons {
		#[command(subcommand)]
		command: CommonCommand,
	},
	/// Register users and edit your profile
	Users {
		#[command(subcommand)]
		command: UserCommand,
	},
	/// List Brazilian states
	States {
		#[arg(long)]
		json: bool,
	},
	/// List the cities of a state
	Cities {
		/// Two-letter state code, e.g. SP
		uf: String,
		#[arg(long)]
		json: bool,
	},
}

#[derive(Subcommand, Debug)]
enum ChurchCommand {
	/// List churches
	List {
		/// Output as JSON
		#[arg(long)]
		json: bool,
	},
	/// Create a church
	Create {
		name: String,
		#[arg(long)]
		state: String,
		#[arg(long)]
		city: String,
	},
	/// Change a church
	Update {
		id: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		state: Option<String>,
		#[arg(long)]
		city: Option<String>,
	},
	/// Delete a church
	Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum CommonCommand {
	/// List congregations
	List {
		/// Output as JSON
		#[arg(long)]
		json: bool,
	},
	/// Create a congregation
	Create {
		name: String,
		#[arg(long)]
		state: String,
		#[arg(long)]
		city: String,
		#[arg(long)]
		church_id: Option<String>,
	},
	/// Change a congregation
	Update {
		id: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		state: Option<String>,
		#[arg(long)]
		city: Option<String>,
		#[arg(long)]
		church_id: Option<String>,
	},
	/// Delete a congregation
	Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
	/// Create an account
	Register {
		#[arg(long)]
		name: String,
		#[arg(long)]
		email: String,
		/// Read from stdin when omitted
		#[arg(long)]
		password: Option<String>,
		#[arg(long)]
		phone: Option<String>,
		#[arg(long)]
		state: Option<String>,
		#[arg(long)]
		city: Option<String>,
		#[arg(long)]
		common_id: Option<String>,
	},
	/// Edit a profile (the signed-in user's by default)
	Update {
		#[arg(long)]
		id: Option<String>,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		phone: Option<String>,
		#[arg(long)]
		state: Option<String>,
		#[arg(long)]
		city: Option<String>,
		#[arg(long)]
		common_id: Option<String>,
		#[arg(long)]
		password: Option<String>,
	},
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			config_file: args.config.clone(),
			api_url: args.api_url.clone(),
			session_file: args.session_file.clone(),
			locale: args.locale.clone(),
			log_level: args.log_level.clone(),
			log_format: args.json_logs.then(|| "json".to_string()),
		}
	}
}

fn log_level_to_tracing(level: LogLevel) -> tracing::Level {
	match level {
		LogLevel::Trace => tracing::Level::TRACE,
		LogLevel::Debug => tracing::Level::DEBUG,
		LogLevel::Info => tracing::Level::INFO,
		LogLevel::Warn => tracing::Level::WARN,
		LogLevel::Error => tracing::Level::ERROR,
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!(
			"congregacao={}",
			log_level_to_tracing(logging.level)
		))
	});

	// stdout carries command output
	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config = load_config(CliOverrides::from(&args)).context("failed to load configuration")?;

	init_tracing(&config.logging);
	let locale = locale::init_locale(config.locale.as_deref());

	info!(
		api_url = %config.api.base_url,
		locale,
		"starting congregacao"
	);

	let app = App::new(config);
	match commands::run(&app, args.command).await {
		Ok(()) => Ok(ExitCode::SUCCESS),
		Err(e) if e.is::<Reported>() => {
			debug!(error = ?e, "command failed after notifying the user");
			Ok(ExitCode::FAILURE)
		}
		Err(e) => Err(e),
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use congregacao_api::{
	present_error, ApiClient, ApiError, Church, Common, CreateChurch, CreateCommon, CreateUser,
	Credentials, Navigator, NoopNavigator, Notifier, UpdateChurch, UpdateCommon, UpdateUser,
};
use congregacao_common_i18n::{t, t_fmt};
use congregacao_common_secret::SecretString;
use congregacao_config::ClientConfig;
use congregacao_ibge::IbgeClient;
use congregacao_session::{FileSessionStore, SessionStore};

use crate::locale::get_locale;
use crate::ui::{cell, StderrNotifier, TerminalNavigator};
use crate::{ChurchCommand, Command, CommonCommand, UserCommand};

/// The failure has already been shown to the user.
#[derive(Debug)]
pub(crate) struct Reported;

impl fmt::Display for Reported {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("error reported to the user")
	}
}

impl std::error::Error for Reported {}

fn reported(err: ApiError, fallback_key: &str) -> anyhow::Error {
	debug!(error = %err, "request failed");
	present_error(&err, fallback_key, get_locale(), &StderrNotifier);
	anyhow::Error::new(Reported)
}

fn notify_error(key: &str) -> anyhow::Error {
	StderrNotifier.error(&t(get_locale(), key));
	anyhow::Error::new(Reported)
}

fn notify_success(key: &str) {
	StderrNotifier.success(&t(get_locale(), key));
}

pub(crate) struct App {
	config: ClientConfig,
	store: Arc<dyn SessionStore>,
}

impl App {
	pub(crate) fn new(config: ClientConfig) -> Self {
		let store = Arc::new(FileSessionStore::new(config.session.file.clone()));
		Self { config, store }
	}

	fn client_with(&self, navigator: Arc<dyn Navigator>) -> Result<ApiClient> {
		ApiClient::new(self.config.api.clone(), self.store.clone(), navigator)
			.context("failed to create API client")
	}

	/// Client whose session teardown tells the user to sign in again.
	fn client(&self) -> Result<ApiClient> {
		self.client_with(Arc::new(TerminalNavigator))
	}

	fn ibge(&self) -> Result<IbgeClient> {
		IbgeClient::new(&self.config.ibge).context("failed to create IBGE client")
	}
}

pub(crate) async fn run(app: &App, command: Command) -> Result<()> {
	match command {
		Command::Login { email, password } => login(app, email, password).await,
		Command::Logout => logout(app).await,
		Command::Whoami => whoami(app).await,
		Command::Churches { command } => churches(app, command).await,
		Command::Commons { command } => commons(app, command).await,
		Command::Users { command } => users(app, command).await,
		Command::States { json } => states(app, json).await,
		Command::Cities { uf, json } => cities(app, &uf, json).await,
	}
}

fn read_password(given: Option<String>) -> Result<SecretString> {
	if let Some(password) = given {
		return Ok(SecretString::from(password));
	}

	eprint!("{}", t(get_locale(), "client.auth.password_prompt"));
	io::stderr().flush().ok();

	let mut line = String::new();
	io::stdin()
		.lock()
		.read_line(&mut line)
		.context("failed to read password")?;
	let password = SecretString::from(line.trim_end_matches(['\r', '\n']));
	if password.is_blank() {
		bail!("password cannot be empty");
	}
	Ok(password)
}

#[instrument(skip_all)]
async fn login(app: &App, email: String, password: Option<String>) -> Result<()> {
	let credentials = Credentials::new(email, read_password(password)?);
	let user = app
		.client()?
		.login(&credentials)
		.await
		.map_err(|e| reported(e, "client.error.login"))?;

	StderrNotifier.success(&t_fmt(
		get_locale(),
		"client.auth.login_success",
		&[("name", user.first_name())],
	));
	Ok(())
}

async fn logout(app: &App) -> Result<()> {
	app.client_with(Arc::new(NoopNavigator))?.logout().await;
	notify_success("client.auth.logged_out");
	Ok(())
}

async fn whoami(app: &App) -> Result<()> {
	let client = app.client_with(Arc::new(NoopNavigator))?;
	let user = client
		.users()
		.current_user()
		.await
		.map_err(|e| reported(e, "client.error.generic"))?
		.ok_or_else(|| notify_error("client.auth.not_logged_in"))?;

	println!(
		"{}",
		t_fmt(get_locale(), "client.cli.greeting", &[("name", &user.name)])
	);
	println!("{} ({})", user.email, user.role);
	if let Some(common) = user.common_id() {
		println!("common: {common}");
	}
	Ok(())
}

/// Refuse church changes for roles that cannot make them. An unknown user
/// is left to the backend.
async fn ensure_church_manager(client: &ApiClient) -> Result<()> {
	match client.users().current_user().await {
		Ok(Some(user)) if !user.role.can_manage_churches() => {
			Err(notify_error("client.error.church.forbidden"))
		}
		_ => Ok(()),
	}
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn print_churches(churches: &[Church]) {
	println!("{} {} {:<4} CITY", cell("ID", 26), cell("NAME", 30), "UF");
	println!("{}", "-".repeat(80));
	for church in churches {
		println!(
			"{} {} {:<4} {}",
			cell(&church.id, 26),
			cell(&church.name, 30),
			church.state,
			church.city
		);
	}
}

fn print_commons(commons: &[Common]) {
	println!(
		"{} {} {:<4} {} CHURCH",
		cell("ID", 26),
		cell("NAME", 30),
		"UF",
		cell("CITY", 20)
	);
	println!("{}", "-".repeat(100));
	for common in commons {
		println!(
			"{} {} {:<4} {} {}",
			cell(&common.id, 26),
			cell(&common.name, 30),
			common.state,
			cell(&common.city, 20),
			common.church_id.as_deref().unwrap_or("-")
		);
	}
}

async fn churches(app: &App, command: ChurchCommand) -> Result<()> {
	let client = app.client()?;
	let service = client.churches();

	match command {
		ChurchCommand::List { json } => {
			let churches = service
				.list()
				.await
				.map_err(|e| reported(e, "client.error.church.load"))?;
			if json {
				print_json(&churches)?;
			} else {
				print_churches(&churches);
			}
		}
		ChurchCommand::Create { name, state, city } => {
			ensure_church_manager(&client).await?;
			let church = service
				.create(&CreateChurch { name, state, city })
				.await
				.map_err(|e| reported(e, "client.error.church.create"))?;
			notify_success("client.church.created");
			println!("{}", church.id);
		}
		ChurchCommand::Update {
			id,
			name,
			state,
			city,
		} => {
			let changes = UpdateChurch { name, state, city };
			if changes.is_empty() {
				bail!("nothing to update: pass --name, --state or --city");
			}
			ensure_church_manager(&client).await?;
			service
				.update(&id, &changes)
				.await
				.map_err(|e| reported(e, "client.error.church.update"))?;
			notify_success("client.church.updated");
		}
		ChurchCommand::Delete { id } => {
			ensure_church_manager(&client).await?;
			service
				.delete(&id)
				.await
				.map_err(|e| reported(e, "client.error.church.delete"))?;
			notify_success("client.church.deleted");
		}
	}
	Ok(())
}

async fn commons(app: &App, command: CommonCommand) -> Result<()> {
	let client = app.client()?;
	let service = client.commons();

	match command {
		CommonCommand::List { json } => {
			let commons = service
				.list()
				.await
				.map_err(|e| reported(e, "client.error.common.load"))?;
			if json {
				print_json(&commons)?;
			} else {
				print_commons(&commons);
			}
		}
		CommonCommand::Create {
			name,
			state,
			city,
			church_id,
		} => {
			let common = service
				.create(&CreateCommon {
					name,
					state,
					city,
					church_id,
				})
				.await
				.map_err(|e| reported(e, "client.error.common.create"))?;
			notify_success("client.common.created");
			println!("{}", common.id);
		}
		CommonCommand::Update {
			id,
			name,
			state,
			city,
			church_id,
		} => {
			let changes = UpdateCommon {
				name,
				state,
				city,
				church_id,
			};
			if changes.is_empty() {
				bail!("nothing to update: pass --name, --state, --city or --church-id");
			}
			service
				.update(&id, &changes)
				.await
				.map_err(|e| reported(e, "client.error.common.update"))?;
			notify_success("client.common.updated");
		}
		CommonCommand::Delete { id } => {
			service
				.delete(&id)
				.await
				.map_err(|e| reported(e, "client.error.common.delete"))?;
			notify_success("client.common.deleted");
		}
	}
	Ok(())
}

async fn users(app: &App, command: UserCommand) -> Result<()> {
	let client = app.client()?;
	let service = client.users();

	match command {
		UserCommand::Register {
			name,
			email,
			password,
			phone,
			state,
			city,
			common_id,
		} => {
			let user = CreateUser {
				name,
				email,
				password: read_password(password)?,
				phone,
				state,
				city,
				common_id,
			};
			let created = service
				.register(&user)
				.await
				.map_err(|e| reported(e, "client.error.user.register"))?;
			notify_success("client.user.registered");
			println!("{}", created.id);
		}
		UserCommand::Update {
			id,
			name,
			phone,
			state,
			city,
			common_id,
			password,
		} => {
			let changes = UpdateUser {
				name,
				phone,
				state,
				city,
				common_id,
				password: password.map(SecretString::from),
			};
			if changes.is_empty() {
				bail!("nothing to update");
			}

			let id = match id {
				Some(id) => id,
				None => service
					.current_user()
					.await
					.map_err(|e| reported(e, "client.error.user.update"))?
					.map(|user| user.id)
					.ok_or_else(|| notify_error("client.user.unknown"))?,
			};

			service
				.update(&id, &changes)
				.await
				.map_err(|e| reported(e, "client.error.user.update"))?;
			notify_success("client.user.updated");
		}
	}
	Ok(())
}

async fn states(app: &App, json: bool) -> Result<()> {
	let mut states = app.ibge()?.states().await;
	if states.is_empty() {
		return Err(notify_error("client.ibge.no_data"));
	}
	states.sort_by(|a, b| a.sigla.cmp(&b.sigla));

	if json {
		return print_json(&states);
	}
	for state in &states {
		println!("{:<4} {}", state.sigla, state.nome);
	}
	Ok(())
}

async fn cities(app: &App, uf: &str, json: bool) -> Result<()> {
	let cities = app.ibge()?.cities(uf).await;
	if cities.is_empty() {
		return Err(notify_error("client.ibge.no_data"));
	}

	if json {
		return print_json(&cities);
	}
	for city in &cities {
		println!("{}", city.nome);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn given_password_is_used_verbatim() {
		let password = read_password(Some("  s3nha ".into())).unwrap();
		assert_eq!(password.expose(), "  s3nha ");
	}

	#[test]
	fn reported_errors_are_recognizable() {
		let err = anyhow::Error::new(Reported);
		assert!(err.is::<Reported>());
		assert!(!anyhow::anyhow!("other").is::<Reported>());
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message catalogs and translation functions.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::locale::{normalize_locale, DEFAULT_LOCALE};

const PT_BR: &[(&str, &str)] = &[
	("client.error.generic", "Ocorreu um erro inesperado. Tente novamente."),
	(
		"client.error.unreachable",
		"Não foi possível conectar ao servidor. Verifique se o backend está rodando.",
	),
	("client.error.login", "Erro ao fazer login. Verifique suas credenciais."),
	("client.error.user.duplicated_email", "Usuário com e-mail já existe"),
	(
		"client.error.user.invalid_credentials",
		"Não foi possível realizar o login, tente novamente mais tarde",
	),
	("client.error.user.register", "Erro ao cadastrar usuário"),
	("client.error.user.update", "Erro ao atualizar perfil"),
	("client.error.church.duplicated_name", "Já existe uma igreja com esse nome"),
	("client.error.church.load", "Erro ao carregar igrejas"),
	("client.error.church.create", "Erro ao criar igreja"),
	("client.error.church.update", "Erro ao atualizar igreja"),
	("client.error.church.delete", "Erro ao excluir igreja"),
	("client.error.church.forbidden", "Seu perfil não permite gerenciar igrejas"),
	("client.error.common.load", "Erro ao carregar comuns"),
	("client.error.common.create", "Erro ao criar comum"),
	("client.error.common.update", "Erro ao atualizar comum"),
	("client.error.common.delete", "Erro ao excluir comum"),
	("client.auth.login_success", "Bem-vindo(a), {name}!"),
	("client.auth.logged_out", "Sessão encerrada."),
	("client.auth.session_expired", "Sua sessão expirou. Faça login novamente com `congregacao login`."),
	("client.auth.not_logged_in", "Nenhuma sessão ativa. Execute `congregacao login`."),
	("client.auth.password_prompt", "Senha: "),
	("client.cli.greeting", "Olá, {name}"),
	("client.church.created", "Igreja criada com sucesso"),
	("client.church.updated", "Igreja atualizada com sucesso"),
	("client.church.deleted", "Igreja excluída com sucesso"),
	("client.common.created", "Comum criada com sucesso"),
	("client.common.updated", "Comum atualizada com sucesso"),
	("client.common.deleted", "Comum excluída com sucesso"),
	("client.user.registered", "Usuário cadastrado com sucesso"),
	("client.user.updated", "Perfil atualizado com sucesso"),
	("client.ibge.no_data", "Nenhum dado disponível no momento."),
	("client.user.unknown", "Não foi possível identificar o usuário da sessão."),
];

const EN: &[(&str, &str)] = &[
	("client.error.generic", "Something went wrong. Please try again."),
	(
		"client.error.unreachable",
		"Could not connect to the server. Check that the backend is running.",
	),
	("client.error.login", "Login failed. Check your credentials."),
	("client.error.user.duplicated_email", "A user with this e-mail already exists"),
	(
		"client.error.user.invalid_credentials",
		"We were unable to log in, please try again later",
	),
	("client.error.user.register", "Could not register the user"),
	("client.error.user.update", "Could not update the profile"),
	("client.error.church.duplicated_name", "A church with this name already exists"),
	("client.error.church.load", "Could not load churches"),
	("client.error.church.create", "Could not create the church"),
	("client.error.church.update", "Could not update the church"),
	("client.error.church.delete", "Could not delete the church"),
	("client.error.church.forbidden", "Your role does not allow managing churches"),
	("client.error.common.load", "Could not load congregations"),
	("client.error.common.create", "Could not create the congregation"),
	("client.error.common.update", "Could not update the congregation"),
	("client.error.common.delete", "Could not delete the congregation"),
	("client.auth.login_success", "Welcome, {name}!"),
	("client.auth.logged_out", "Signed out."),
	("client.auth.session_expired", "Your session has expired. Sign in again with `congregacao login`."),
	("client.auth.not_logged_in", "No active session. Run `congregacao login`."),
	("client.auth.password_prompt", "Password: "),
	("client.cli.greeting", "Hello, {name}"),
	("client.church.created", "Church created"),
	("client.church.updated", "Church updated"),
	("client.church.deleted", "Church deleted"),
	("client.common.created", "Congregation created"),
	("client.common.updated", "Congregation updated"),
	("client.common.deleted", "Congregation deleted"),
	("client.user.registered", "User registered"),
	("client.user.updated", "Profile updated"),
	("client.ibge.no_data", "No data available yet."),
	("client.user.unknown", "Could not tell which user is signed in."),
];

static CATALOGS: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> = Lazy::new(|| {
	let mut map = HashMap::new();
	map.insert("pt-BR", PT_BR.iter().copied().collect());
	map.insert("en", EN.iter().copied().collect());
	tracing::trace!(locales = map.len(), "message catalogs loaded");
	map
});

fn lookup(locale: &str, msgid: &str) -> Option<&'static str> {
	CATALOGS.get(locale)?.get(msgid).copied()
}

/// Translate a message ID.
///
/// Falls back to the default catalog, then to the message ID itself.
pub fn t(locale: &str, msgid: &str) -> String {
	let locale = normalize_locale(locale).unwrap_or(DEFAULT_LOCALE);

	if let Some(text) = lookup(locale, msgid) {
		return text.to_string();
	}

	if locale != DEFAULT_LOCALE {
		if let Some(text) = lookup(DEFAULT_LOCALE, msgid) {
			return text.to_string();
		}
	}

	msgid.to_string()
}

/// Translate a message ID and substitute `{name}` placeholders.
pub fn t_fmt(locale: &str, msgid: &str, args: &[(&str, &str)]) -> String {
	let mut result = t(locale, msgid);

	for (name, value) in args {
		let placeholder = format!("{{{name}}}");
		result = result.replace(&placeholder, value);
	}

	result
}

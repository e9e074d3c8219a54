// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Local congregations (`/commons`).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::Result;

const COMMONS_PATH: &str = "/commons";

/// A local congregation, optionally attached to a church.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Common {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub city: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub church_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommon {
	pub name: String,
	pub state: String,
	pub city: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub church_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommon {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub church_id: Option<String>,
}

impl UpdateCommon {
	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.state.is_none() && self.city.is_none() && self.church_id.is_none()
	}
}

#[derive(Debug, Clone, Copy)]
pub struct Commons<'a> {
	client: &'a ApiClient,
}

impl ApiClient {
	pub fn commons(&self) -> Commons<'_> {
		Commons { client: self }
	}
}

impl Commons<'_> {
	#[instrument(skip_all)]
	pub async fn list(&self) -> Result<Vec<Common>> {
		self.client.get_json(COMMONS_PATH).await
	}

	#[instrument(skip_all, fields(name = %common.name))]
	pub async fn create(&self, common: &CreateCommon) -> Result<Common> {
		let created: Common = self.client.post_json(COMMONS_PATH, common).await?;
		info!(common_id = %created.id, "common created");
		Ok(created)
	}

	#[instrument(skip_all, fields(common_id = %id))]
	pub async fn update(&self, id: &str, changes: &UpdateCommon) -> Result<()> {
		self.client.patch(&format!("{COMMONS_PATH}/{id}"), changes).await?;
		info!("common updated");
		Ok(())
	}

	#[instrument(skip_all, fields(common_id = %id))]
	pub async fn delete(&self, id: &str) -> Result<()> {
		self.client.delete(&format!("{COMMONS_PATH}/{id}")).await?;
		info!("common deleted");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn church_link_is_camel_case() {
		let create = CreateCommon {
			name: "Vila Nova".into(),
			state: "MG".into(),
			city: "Uberlândia".into(),
			church_id: Some("c1".into()),
		};
		let value = serde_json::to_value(&create).unwrap();
		assert_eq!(value["churchId"], "c1");

		let without_link = serde_json::to_value(CreateCommon {
			church_id: None,
			..create
		})
		.unwrap();
		assert!(without_link.get("churchId").is_none());
	}

	#[test]
	fn common_without_church() {
		let common: Common =
			serde_json::from_str(r#"{"id":"m1","name":"Vila Nova","state":"MG","city":"Uberlândia"}"#).unwrap();
		assert_eq!(common.church_id, None);
	}
}

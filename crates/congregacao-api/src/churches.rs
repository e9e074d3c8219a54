// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Church management (`/churchs`).

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::Result;

const CHURCHES_PATH: &str = "/churchs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Church {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub state: String,
	#[serde(default)]
	pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChurch {
	pub name: String,
	pub state: String,
	pub city: String,
}

/// Partial update; unset fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChurch {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
}

impl UpdateChurch {
	pub fn is_empty(&self) -> bool {
		self.name.is_none() && self.state.is_none() && self.city.is_none()
	}
}

/// Church endpoints, borrowed from an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct Churches<'a> {
	client: &'a ApiClient,
}

impl ApiClient {
	pub fn churches(&self) -> Churches<'_> {
		Churches { client: self }
	}
}

impl Churches<'_> {
	#[instrument(skip_all)]
	pub async fn list(&self) -> Result<Vec<Church>> {
		self.client.get_json(CHURCHES_PATH).await
	}

	#[instrument(skip_all, fields(name = %church.name))]
	pub async fn create(&self, church: &CreateChurch) -> Result<Church> {
		let created: Church = self.client.post_json(CHURCHES_PATH, church).await?;
		info!(church_id = %created.id, "church created");
		Ok(created)
	}

	#[instrument(skip_all, fields(church_id = %id))]
	pub async fn update(&self, id: &str, changes: &UpdateChurch) -> Result<()> {
		self.client.patch(&format!("{CHURCHES_PATH}/{id}"), changes).await?;
		info!("church updated");
		Ok(())
	}

	#[instrument(skip_all, fields(church_id = %id))]
	pub async fn delete(&self, id: &str) -> Result<()> {
		self.client.delete(&format!("{CHURCHES_PATH}/{id}")).await?;
		info!("church deleted");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_update_omits_unset_fields() {
		let changes = UpdateChurch {
			city: Some("Campinas".into()),
			..Default::default()
		};
		assert_eq!(
			serde_json::to_value(&changes).unwrap(),
			serde_json::json!({"city": "Campinas"})
		);
		assert!(!changes.is_empty());
		assert!(UpdateChurch::default().is_empty());
	}

	#[test]
	fn church_tolerates_extra_fields() {
		let church: Church = serde_json::from_str(
			r#"{"id":"c1","name":"Central","state":"SP","city":"Campinas","createdAt":"2024-01-01T00:00:00Z"}"#,
		)
		.unwrap();
		assert_eq!(church.name, "Central");
	}
}

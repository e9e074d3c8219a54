// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction.
//!
//! Every outbound client (backend API, IBGE lookups) is built here so they
//! share one User-Agent and the JSON content type.

mod client;

pub use client::{build_client, builder, json_builder, user_agent};

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Brazilian states and cities from the IBGE localities service.
//!
//! Lookups are best-effort: any failure is logged and yields an empty list,
//! so forms can fall back to free-text input.

mod client;
mod error;

pub use client::{IbgeCity, IbgeClient, IbgeState};
pub use error::IbgeError;

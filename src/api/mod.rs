// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API for the research node
//!
//! - `GET /health` - liveness probe
//! - `POST /v1/research` - run the research pipeline for a query

pub mod http_server;
pub mod research;

pub use http_server::{router, start_server, AppState};
pub use research::{ResearchApiRequest, ResearchApiResponse};

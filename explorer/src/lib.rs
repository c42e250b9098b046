// Copyright (c) 2026 Proofgold Community. MIT License.
// See LICENSE for details.

//! # Proofgold Explorer — Core Library
//!
//! Everything needed to turn a block identifier into a rendered block page:
//! query the Proofgold daemon, classify what the identifier actually names,
//! and render the block's fields into HTML. The HTTP server, CLI, and
//! metrics live in the `proofgold-web` binary crate.
//!
//! ## Architecture
//!
//! The pipeline runs straight through, one stage per module:
//!
//! - **model** — Serde types for the daemon's `querymg` envelope and the
//!   records inside it.
//! - **lookup** — The [`ChainQuery`](lookup::ChainQuery) seam and the TCP
//!   daemon client behind it.
//! - **classify** — Decides whether a lookup result is a block, something
//!   else (redirect), or nothing at all (error).
//! - **page** — Drives fetch → classify → render for one request,
//!   including the bounded predecessor lookup.
//! - **render** — The block page itself, as maud markup.
//! - **abbrev** — Display summaries for addresses, assets, transactions,
//!   and outputs.
//! - **config** — Chain constants and defaults. The genesis override lives
//!   here and nowhere else.
//! - **error** — The failure taxonomy for the whole pipeline.
//!
//! Records are transient: constructed from one daemon reply, consumed by
//! one render pass, dropped. Nothing is cached between page views.

pub mod abbrev;
pub mod classify;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod page;
pub mod render;

//! # Block Page Rendering
//!
//! Turns a fetched [`BlockRecord`] into the displayed page. Assembly
//! ([`BlockView::assemble`]) decides *what* each cell shows, including
//! the genesis height override; [`block_html`] decides *how*, as maud
//! markup mirroring the classic two-column field table.
//!
//! Rendering is pure. No clocks, no randomness: rendering the same view
//! twice yields byte-identical output.

use chrono::{TimeZone, Utc};
use maud::{html, Markup, DOCTYPE};

use crate::abbrev;
use crate::config;
use crate::model::{BlockRecord, CoinstakeOutput};

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Everything the block page displays, in display form.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    /// Displayed height, genesis override already applied.
    pub height: u64,
    /// Creation time as `YYYY-MM-DD HH:MM:SS GMT`.
    pub creation: String,
    /// State of the previous-block cell.
    pub prev: PrevCell,
    /// State of the stake-address cell.
    pub stake: StakeCell,
    /// Litecoin burn transaction id, when the record carries a predecessor.
    pub burn_tx: Option<String>,
    /// Transaction identifiers in inclusion order.
    pub txs: Vec<String>,
    /// Coinstake outputs in original order.
    pub outputs: Vec<CoinstakeOutput>,
}

/// The previous-block cell.
#[derive(Debug, Clone, PartialEq)]
pub enum PrevCell {
    /// The record carries no predecessor reference.
    Absent,
    /// The predecessor resolved; `height` is what the fetched predecessor
    /// itself reports, rendered as-is even if it disagrees with the
    /// current block's height arithmetic.
    Resolved { id: String, height: u64 },
    /// The nested lookup failed or named something that is not a block.
    Broken { id: String },
}

/// The stake-address cell.
#[derive(Debug, Clone, PartialEq)]
pub enum StakeCell {
    /// Block staked against an asset.
    Staked { address: String, asset_id: String },
    /// Block produced by a pure burn; no asset involved.
    PureBurn { address: String },
}

impl BlockView {
    /// Builds the view for `block`, fetched under `requested_id`.
    ///
    /// `prev` is resolved by the caller (it may require a nested lookup);
    /// pass [`PrevCell::Absent`] when the record has no predecessor.
    pub fn assemble(block: &BlockRecord, requested_id: &str, prev: PrevCell) -> Self {
        let height = if config::is_genesis(requested_id) {
            config::GENESIS_DISPLAY_HEIGHT
        } else {
            block.height
        };

        let stake = match &block.stake_asset_id {
            Some(asset_id) => StakeCell::Staked {
                address: block.stake_address.clone(),
                asset_id: asset_id.clone(),
            },
            None => StakeCell::PureBurn {
                address: block.stake_address.clone(),
            },
        };

        BlockView {
            height,
            creation: format_creation(block.timestamp),
            prev,
            stake,
            burn_tx: block.prev_block.as_ref().map(|r| r.ltc_burn_tx.clone()),
            txs: block.txs.clone(),
            outputs: block
                .coinstake
                .as_ref()
                .map(|c| c.vout.clone())
                .unwrap_or_default(),
        }
    }
}

/// Formats a block timestamp as an absolute UTC date-time.
///
/// Timestamps chrono cannot represent render as the raw integer; a bad
/// timestamp must never take the page down.
pub fn format_creation(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format(config::CREATION_TIME_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// Renders the full block page document.
pub fn block_html(view: &BlockView) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Proofgold Block" }
            }
            body {
                h1 { "Proofgold Block" }
                table {
                    tr {
                        (cell("height", html! { (view.height) }))
                        (cell("creation", html! { (view.creation) }))
                    }
                    tr {
                        (cell("previous", prev_cell(&view.prev)))
                        (cell("stake address", stake_cell(view)))
                    }
                    tr {
                        (cell("transactions", txs_cell(&view.txs)))
                        (cell("outputs", outputs_cell(&view.outputs)))
                    }
                }
            }
        }
    }
}

/// One labeled field cell, as a nested single-column table.
fn cell(label: &str, content: Markup) -> Markup {
    html! {
        td {
            table {
                tr { th { (label) } }
                tr { td { (content) } }
            }
        }
    }
}

fn prev_cell(prev: &PrevCell) -> Markup {
    match prev {
        PrevCell::Absent => html! { (config::EMPTY_CELL) },
        PrevCell::Resolved { id, height } => abbrev::block_link(id, *height),
        PrevCell::Broken { id } => html! {
            "unresolved " code { (abbrev::short_id(id)) }
        },
    }
}

fn stake_cell(view: &BlockView) -> Markup {
    html! {
        @match &view.stake {
            StakeCell::Staked { address, asset_id } => {
                (abbrev::address_with_asset(address, asset_id))
            },
            StakeCell::PureBurn { address } => {
                "Pure Burn " (abbrev::address(address))
            },
        }
        br;
        @match &view.burn_tx {
            Some(txid) => { (burn_link(txid)) },
            None => { (config::EMPTY_CELL) },
        }
    }
}

/// Link to the Litecoin burn transaction on the external explorer,
/// labeled with the fixed prefix and the first characters of the txid.
fn burn_link(txid: &str) -> Markup {
    let label = txid.get(..config::BURN_TX_LABEL_CHARS).unwrap_or(txid);
    html! {
        a href=(format!("{}{}", config::BURN_TX_EXPLORER_URL, txid)) {
            (config::BURN_TX_LABEL_PREFIX) (label)
        }
    }
}

fn txs_cell(txs: &[String]) -> Markup {
    html! {
        @for txid in txs {
            (abbrev::tx_link(txid)) br;
        }
    }
}

fn outputs_cell(outputs: &[CoinstakeOutput]) -> Markup {
    html! {
        @for output in outputs {
            (abbrev::output_line(output))
        }
    }
}

//! # Display Summaries
//!
//! Small formatters that turn full-length identifiers into the compact
//! linked summaries the block page shows: abbreviated addresses, tx links
//! into the generic record view, single output lines.
//!
//! Abbreviation is display-only. Every link carries the full identifier;
//! only the visible text is shortened.

use maud::{html, Markup};

use crate::config;
use crate::model::CoinstakeOutput;

/// Identifiers at most this long render verbatim.
const SHORT_ID_MAX: usize = 16;
/// Leading characters kept when abbreviating.
const SHORT_ID_PREFIX: usize = 8;
/// Trailing characters kept when abbreviating.
const SHORT_ID_SUFFIX: usize = 4;

/// Abbreviates a long identifier to `prefix…suffix`; short ones pass
/// through unchanged.
pub fn short_id(id: &str) -> String {
    if id.len() <= SHORT_ID_MAX {
        return id.to_string();
    }
    match (
        id.get(..SHORT_ID_PREFIX),
        id.get(id.len() - SHORT_ID_SUFFIX..),
    ) {
        (Some(prefix), Some(suffix)) => format!("{}…{}", prefix, suffix),
        // Multi-byte characters straddling the cut points; show as-is.
        _ => id.to_string(),
    }
}

/// Address summary: abbreviated text linking to the generic record view.
pub fn address(addr: &str) -> Markup {
    html! {
        a href=(format!("{}?b={}", config::GENERIC_LOOKUP_PATH, addr)) { (short_id(addr)) }
    }
}

/// Staked-address summary: the address plus the asset that backed the stake.
pub fn address_with_asset(addr: &str, asset_id: &str) -> Markup {
    html! {
        (address(addr)) " (asset " code { (short_id(asset_id)) } ")"
    }
}

/// Transaction summary: abbreviated id linking to the generic record view.
pub fn tx_link(txid: &str) -> Markup {
    html! {
        a href=(format!("{}?b={}", config::GENERIC_LOOKUP_PATH, txid)) {
            code { (short_id(txid)) }
        }
    }
}

/// Block summary: a link into the block page, tagged with the height the
/// block reports.
pub fn block_link(id: &str, height: u64) -> Markup {
    html! {
        a href=(format!("{}?b={}", config::BLOCK_PAGE_PATH, id)) {
            "#" (height) " " code { (short_id(id)) }
        }
    }
}

/// One coinstake output line: amount and receiving address.
pub fn output_line(output: &CoinstakeOutput) -> Markup {
    html! {
        div { (output.value) " bars to " (address(&output.address)) }
    }
}

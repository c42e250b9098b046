//! # Daemon Envelope & Record Types
//!
//! Serde types for the reply to a `querymg <identifier>` daemon command.
//! The wire shape is:
//!
//! ```text
//! {
//!   "response": "known" | "unknown",
//!   "dbdata": [ { "type": "block" | "tx" | "asset" | ..., ...fields } ]
//! }
//! ```
//!
//! The `type` field discriminates what kind of record the identifier names.
//! Only blocks are decoded in full; every other kind classifies the same
//! way (redirect to the generic record view), so the details are not kept.
//!
//! Field names on the Rust side are idiomatic; `#[serde(rename)]` pins the
//! daemon's wire names.

use serde::Deserialize;

use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Lookup result
// ---------------------------------------------------------------------------

/// Outcome of one `querymg` lookup, after envelope validation.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// The daemon does not recognize the identifier.
    Unknown,
    /// The identifier names a record; `type` says which kind.
    Known(ChainRecord),
}

/// One record from the daemon's `dbdata` array, discriminated by `type`.
///
/// Closed set on purpose: a block carries everything the page needs, and
/// any other kind (transaction, asset, address, whatever the daemon grows
/// next) is only ever redirected, so one catch-all variant covers them all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ChainRecord {
    /// The identifier names a block.
    #[serde(rename = "block")]
    Block(BlockRecord),
    /// The identifier names some other record kind.
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Block record
// ---------------------------------------------------------------------------

/// A block as the daemon reports it.
///
/// Transient: built from one daemon reply, consumed by one render pass,
/// never mutated, never cached.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockRecord {
    /// Ordinal position in the chain.
    pub height: u64,
    /// Creation time, seconds since epoch.
    pub timestamp: i64,
    /// Link to the previous block. Absent only for the genesis block.
    #[serde(rename = "prevblock", default)]
    pub prev_block: Option<PrevBlockRef>,
    /// Address that staked or burned for this block.
    #[serde(rename = "stakeaddress")]
    pub stake_address: String,
    /// Asset the stake was backed by. Absent on a pure-burn block.
    #[serde(rename = "stakeassetid", default)]
    pub stake_asset_id: Option<String>,
    /// Identifiers of the transactions included in the block, in inclusion
    /// order. The order carries meaning and must be preserved.
    #[serde(default)]
    pub txs: Vec<String>,
    /// The coinstake transaction, whose outputs are the block's displayed
    /// outputs.
    #[serde(rename = "coinstk", default)]
    pub coinstake: Option<CoinstakeTx>,
    /// Ledger root after this block. On the wire but not displayed.
    #[serde(rename = "newledgerroot", default)]
    pub new_ledger_root: Option<String>,
    /// Theory root after this block. On the wire but not displayed.
    #[serde(rename = "newtheoryroot", default)]
    pub new_theory_root: Option<String>,
}

/// Reference to a block's predecessor, with the Litecoin burn transaction
/// that anchored it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrevBlockRef {
    /// Identifier of the previous Proofgold block.
    pub block: String,
    /// Identifier of the burn transaction on the Litecoin chain.
    #[serde(rename = "ltcburntx")]
    pub ltc_burn_tx: String,
}

/// The block's reward-distributing transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinstakeTx {
    /// Outputs in their original order.
    #[serde(default)]
    pub vout: Vec<CoinstakeOutput>,
}

/// One output of the coinstake transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoinstakeOutput {
    /// Receiving address.
    #[serde(rename = "addr")]
    pub address: String,
    /// Amount in bars.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Envelope decoding
// ---------------------------------------------------------------------------

/// Raw envelope as it arrives, before validation. `response` is optional
/// here only so that its absence can be reported as a malformed envelope
/// rather than a generic parse failure.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    response: Option<String>,
    #[serde(default)]
    dbdata: Vec<serde_json::Value>,
}

/// Decodes one daemon reply into a [`LookupResult`].
///
/// A reply that is not JSON, lacks the `response` discriminator, carries an
/// unexpected `response` value, or answers "known" without a record is a
/// transport-class failure, distinct from a well-formed "unknown" answer,
/// which is a valid (negative) result.
pub fn decode_envelope(raw: &[u8]) -> Result<LookupResult, ExplorerError> {
    let envelope: RawEnvelope = serde_json::from_slice(raw)?;

    match envelope.response.as_deref() {
        None => Err(ExplorerError::MalformedEnvelope(
            "missing response discriminator".into(),
        )),
        Some("unknown") => Ok(LookupResult::Unknown),
        Some("known") => {
            let first = envelope.dbdata.into_iter().next().ok_or_else(|| {
                ExplorerError::MalformedEnvelope("known answer with empty dbdata".into())
            })?;
            let record = serde_json::from_value::<ChainRecord>(first).map_err(|e| {
                ExplorerError::MalformedEnvelope(format!("undecodable dbdata record: {}", e))
            })?;
            Ok(LookupResult::Known(record))
        }
        Some(other) => Err(ExplorerError::MalformedEnvelope(format!(
            "unexpected response value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<LookupResult, ExplorerError> {
        decode_envelope(s.as_bytes())
    }

    #[test]
    fn full_block_record_decodes() {
        let result = decode(
            r#"{
                "response": "known",
                "dbdata": [{
                    "type": "block",
                    "height": 1200,
                    "timestamp": 1700000000,
                    "prevblock": { "block": "aa11", "ltcburntx": "bb22" },
                    "stakeaddress": "PrAddr1",
                    "stakeassetid": "asset9",
                    "txs": ["t1", "t2", "t3"],
                    "coinstk": { "vout": [{ "addr": "PrAddr1", "value": 25.0 }] },
                    "newledgerroot": "lr",
                    "newtheoryroot": "tr"
                }]
            }"#,
        )
        .unwrap();

        let LookupResult::Known(ChainRecord::Block(block)) = result else {
            panic!("expected a block record");
        };
        assert_eq!(block.height, 1200);
        assert_eq!(block.prev_block.as_ref().unwrap().ltc_burn_tx, "bb22");
        assert_eq!(block.stake_asset_id.as_deref(), Some("asset9"));
        assert_eq!(block.txs, vec!["t1", "t2", "t3"]);
        assert_eq!(block.coinstake.unwrap().vout[0].address, "PrAddr1");
        assert_eq!(block.new_ledger_root.as_deref(), Some("lr"));
    }

    #[test]
    fn minimal_block_record_decodes() {
        // The reference vector: a pure-burn block with no predecessor.
        let result = decode(
            r#"{"response":"known","dbdata":[{"type":"block","height":500,"timestamp":1700000000,"stakeaddress":"addrA"}]}"#,
        )
        .unwrap();

        let LookupResult::Known(ChainRecord::Block(block)) = result else {
            panic!("expected a block record");
        };
        assert_eq!(block.height, 500);
        assert_eq!(block.timestamp, 1_700_000_000);
        assert!(block.prev_block.is_none());
        assert!(block.stake_asset_id.is_none());
        assert!(block.txs.is_empty());
        assert!(block.coinstake.is_none());
    }

    #[test]
    fn unknown_answer_is_a_valid_result() {
        assert_eq!(
            decode(r#"{"response":"unknown","dbdata":[]}"#).unwrap(),
            LookupResult::Unknown
        );
    }

    #[test]
    fn non_block_kinds_collapse_to_other() {
        for kind in ["tx", "asset", "addr", "theory"] {
            let raw = format!(
                r#"{{"response":"known","dbdata":[{{"type":"{}","txid":"x"}}]}}"#,
                kind
            );
            assert_eq!(
                decode(&raw).unwrap(),
                LookupResult::Known(ChainRecord::Other),
                "kind {} should classify as Other",
                kind
            );
        }
    }

    #[test]
    fn missing_response_field_is_malformed() {
        let err = decode(r#"{"dbdata":[]}"#).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedEnvelope(_)));
    }

    #[test]
    fn unexpected_response_value_is_malformed() {
        let err = decode(r#"{"response":"maybe","dbdata":[]}"#).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedEnvelope(_)));
    }

    #[test]
    fn known_with_empty_dbdata_is_malformed() {
        let err = decode(r#"{"response":"known","dbdata":[]}"#).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedEnvelope(_)));
    }

    #[test]
    fn block_with_missing_fields_is_malformed() {
        // type says "block" but the record lacks required fields.
        let err = decode(r#"{"response":"known","dbdata":[{"type":"block"}]}"#).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedEnvelope(_)));
    }

    #[test]
    fn non_json_reply_is_bad_json() {
        let err = decode_envelope(b"ERROR: no such command").unwrap_err();
        assert!(matches!(err, ExplorerError::BadJson(_)));
    }

    #[test]
    fn tx_order_is_preserved() {
        let raw = r#"{"response":"known","dbdata":[{"type":"block","height":7,"timestamp":0,"stakeaddress":"a","txs":["z","a","m"]}]}"#;
        let LookupResult::Known(ChainRecord::Block(block)) = decode(raw).unwrap() else {
            panic!("expected a block record");
        };
        assert_eq!(block.txs, vec!["z", "a", "m"]);
    }
}

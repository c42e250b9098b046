//! # Page Pipeline
//!
//! The straight line from identifier to outcome: fetch the record,
//! classify it, render the page. The only branch that fans out is the
//! previous-block cell, which needs exactly one nested lookup.
//!
//! A failed or misclassified predecessor lookup never takes the page
//! down: that cell degrades to a broken-link summary and everything else
//! renders normally. Only a transport-class failure on the *requested*
//! identifier, or an explicit "unknown" answer for it, aborts the view.

use crate::classify::{classify, Classification};
use crate::error::ExplorerError;
use crate::lookup::ChainQuery;
use crate::render::{block_html, BlockView, PrevCell};

/// Outcome of one block page request.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The identifier named a block; here is the page.
    Rendered(String),
    /// The identifier named some other record; the caller should redirect
    /// to the generic record view with this identifier, unchanged.
    Redirect(String),
}

/// Resolves `requested_id` and renders its block page.
///
/// Issues at most two daemon queries: the block itself and, when the
/// record links a predecessor, that one predecessor.
pub async fn block_page(
    client: &dyn ChainQuery,
    requested_id: &str,
) -> Result<PageOutcome, ExplorerError> {
    let result = client.query_record(requested_id).await?;

    let block = match classify(result, requested_id)? {
        Classification::Redirect(id) => return Ok(PageOutcome::Redirect(id)),
        Classification::Proceed(block) => block,
    };

    let prev = match &block.prev_block {
        None => PrevCell::Absent,
        Some(prev_ref) => predecessor_summary(client, &prev_ref.block).await,
    };

    let view = BlockView::assemble(&block, requested_id, prev);
    Ok(PageOutcome::Rendered(block_html(&view).into_string()))
}

/// Resolves the immediate predecessor with a single bounded lookup.
///
/// Not recursive: the predecessor's own predecessor is never followed,
/// which keeps the "no chain walk" guarantee enforceable. The cell shows
/// the height the fetched predecessor reports, whatever that is.
async fn predecessor_summary(client: &dyn ChainQuery, prev_id: &str) -> PrevCell {
    let result = match client.query_record(prev_id).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(predecessor = prev_id, error = %e, "predecessor lookup failed");
            return PrevCell::Broken {
                id: prev_id.to_string(),
            };
        }
    };

    match classify(result, prev_id) {
        Ok(Classification::Proceed(prev)) => PrevCell::Resolved {
            id: prev_id.to_string(),
            height: prev.height,
        },
        Ok(Classification::Redirect(_)) => {
            tracing::warn!(predecessor = prev_id, "predecessor is not a block");
            PrevCell::Broken {
                id: prev_id.to_string(),
            }
        }
        Err(e) => {
            tracing::warn!(predecessor = prev_id, error = %e, "predecessor did not classify");
            PrevCell::Broken {
                id: prev_id.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::model::decode_envelope;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// ChainQuery backed by canned envelopes, recording every query.
    struct ScriptedChain {
        replies: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedChain {
        fn new<const N: usize>(entries: [(&str, &str); N]) -> Self {
            Self {
                replies: entries
                    .into_iter()
                    .map(|(id, raw)| (id.to_string(), raw.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChainQuery for ScriptedChain {
        async fn query_record(
            &self,
            identifier: &str,
        ) -> Result<crate::model::LookupResult, ExplorerError> {
            self.calls.lock().unwrap().push(identifier.to_string());
            match self.replies.get(identifier) {
                Some(raw) => decode_envelope(raw.as_bytes()),
                None => Err(ExplorerError::Transport(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "no daemon scripted for this identifier",
                ))),
            }
        }
    }

    const REFERENCE: &str = r#"{"response":"known","dbdata":[{"type":"block","height":500,"timestamp":1700000000,"stakeaddress":"addrA"}]}"#;
    const LINKED: &str = r#"{"response":"known","dbdata":[{"type":"block","height":501,"timestamp":1700000060,"stakeaddress":"addrB","prevblock":{"block":"prev1","ltcburntx":"lburn77abc"}}]}"#;

    fn rendered(outcome: PageOutcome) -> String {
        match outcome {
            PageOutcome::Rendered(html) => html,
            PageOutcome::Redirect(id) => panic!("unexpected redirect to {}", id),
        }
    }

    // -- 1. Reference vector: one query, no predecessor ----------------------

    #[tokio::test]
    async fn reference_block_renders_with_single_query() {
        let chain = ScriptedChain::new([("X", REFERENCE)]);
        let page = rendered(block_page(&chain, "X").await.unwrap());

        assert!(page.contains("500"));
        assert!(page.contains("2023-11-14 22:13:20 GMT"));
        assert!(page.contains("Pure Burn"));
        assert!(page.contains("addrA"));
        assert_eq!(chain.calls(), vec!["X"]);
    }

    // -- 2. Predecessor resolves through one nested query --------------------

    #[tokio::test]
    async fn predecessor_resolves_with_exactly_one_nested_query() {
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", REFERENCE)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());

        // The cell is tagged with the height the predecessor reports.
        assert!(page.contains("#500"));
        assert!(page.contains("/block?b=prev1"));
        assert_eq!(chain.calls(), vec!["top", "prev1"]);
    }

    // -- 3. Depth bound: the predecessor's predecessor is never fetched ------

    #[tokio::test]
    async fn predecessor_chain_is_not_walked() {
        let prev_with_own_prev = r#"{"response":"known","dbdata":[{"type":"block","height":499,"timestamp":1,"stakeaddress":"a","prevblock":{"block":"grandprev","ltcburntx":"lb"}}]}"#;
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", prev_with_own_prev)]);
        let _ = rendered(block_page(&chain, "top").await.unwrap());

        assert_eq!(chain.calls(), vec!["top", "prev1"]);
    }

    // -- 4. Inconsistent predecessor height renders as fetched ---------------

    #[tokio::test]
    async fn inconsistent_predecessor_height_renders_as_fetched() {
        let off_by_many = r#"{"response":"known","dbdata":[{"type":"block","height":777,"timestamp":1,"stakeaddress":"a"}]}"#;
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", off_by_many)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());

        assert!(page.contains("#777"));
    }

    // -- 5. Broken predecessor degrades only its cell ------------------------

    #[tokio::test]
    async fn failed_predecessor_lookup_degrades_gracefully() {
        // "prev1" is not scripted, so the nested lookup fails.
        let chain = ScriptedChain::new([("top", LINKED)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());

        assert!(page.contains("unresolved"));
        assert!(page.contains("501"));
        assert!(page.contains("LBT:lburn"));
        assert_eq!(chain.calls(), vec!["top", "prev1"]);
    }

    #[tokio::test]
    async fn non_block_predecessor_degrades_gracefully() {
        let tx_record = r#"{"response":"known","dbdata":[{"type":"tx","txid":"prev1"}]}"#;
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", tx_record)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());

        assert!(page.contains("unresolved"));
        assert!(page.contains("501"));
    }

    #[tokio::test]
    async fn unknown_predecessor_degrades_gracefully() {
        let unknown = r#"{"response":"unknown","dbdata":[]}"#;
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", unknown)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());

        assert!(page.contains("unresolved"));
    }

    // -- 6. Unknown requested identifier is terminal -------------------------

    #[tokio::test]
    async fn unknown_identifier_aborts() {
        let chain = ScriptedChain::new([("X", r#"{"response":"unknown","dbdata":[]}"#)]);
        let err = block_page(&chain, "X").await.unwrap_err();
        assert!(matches!(err, ExplorerError::UnknownIdentifier));
    }

    // -- 7. Non-block identifier redirects verbatim --------------------------

    #[tokio::test]
    async fn non_block_identifier_redirects() {
        let chain =
            ScriptedChain::new([("tx99", r#"{"response":"known","dbdata":[{"type":"tx"}]}"#)]);
        let outcome = block_page(&chain, "tx99").await.unwrap();
        assert_eq!(outcome, PageOutcome::Redirect("tx99".to_string()));
    }

    // -- 8. Transport failure on the requested id aborts ---------------------

    #[tokio::test]
    async fn transport_failure_aborts() {
        let chain = ScriptedChain::new([]);
        let err = block_page(&chain, "X").await.unwrap_err();
        assert!(matches!(err, ExplorerError::Transport(_)));
    }

    // -- 9. Genesis override applies to the outer block only -----------------

    #[tokio::test]
    async fn genesis_override_is_display_only_and_outer_only() {
        // The genesis record itself reports a wild height; display pins it.
        let genesis_record = r#"{"response":"known","dbdata":[{"type":"block","height":123456,"timestamp":0,"stakeaddress":"g"}]}"#;
        let chain = ScriptedChain::new([(config::GENESIS_BLOCK_ID, genesis_record)]);
        let page = rendered(block_page(&chain, config::GENESIS_BLOCK_ID).await.unwrap());

        assert!(page.contains(">1</td>"));
        assert!(!page.contains("123456"));

        // A block whose predecessor happens to be fetched under a
        // non-genesis id keeps the fetched height; the override never
        // applies to the nested summary.
        let chain = ScriptedChain::new([("top", LINKED), ("prev1", genesis_record)]);
        let page = rendered(block_page(&chain, "top").await.unwrap());
        assert!(page.contains("#123456"));
    }

    // -- 10. Idempotence across repeated renders -----------------------------

    #[tokio::test]
    async fn repeated_renders_are_byte_identical() {
        let chain = ScriptedChain::new([("X", REFERENCE)]);
        let first = rendered(block_page(&chain, "X").await.unwrap());
        let second = rendered(block_page(&chain, "X").await.unwrap());
        assert_eq!(first, second);
    }
}

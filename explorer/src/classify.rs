//! # Response Classifier
//!
//! One lookup result, three ways forward: render the block, redirect to
//! the generic record view, or stop with a user-visible error. The
//! decision keys on the record's `type` discriminator alone, never on
//! which fields happen to be present.

use crate::error::ExplorerError;
use crate::model::{BlockRecord, ChainRecord, LookupResult};

/// What to do with a classified lookup result.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The identifier names a block; render it.
    Proceed(BlockRecord),
    /// The identifier names some other record kind. The caller should
    /// defer to the generic record view, passing the identifier through
    /// unchanged.
    Redirect(String),
}

/// Classifies a lookup result for `requested_id`.
///
/// An [`LookupResult::Unknown`] answer is terminal: the identifier shares
/// one namespace with transactions, assets, and the rest, so "unknown"
/// means the daemon has never seen it under any kind.
pub fn classify(
    result: LookupResult,
    requested_id: &str,
) -> Result<Classification, ExplorerError> {
    match result {
        LookupResult::Unknown => Err(ExplorerError::UnknownIdentifier),
        LookupResult::Known(ChainRecord::Block(block)) => Ok(Classification::Proceed(block)),
        LookupResult::Known(ChainRecord::Other) => {
            Ok(Classification::Redirect(requested_id.to_string()))
        }
    }
}

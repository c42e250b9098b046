//! # Chain Constants & Defaults
//!
//! Every magic value the explorer depends on lives here. The genesis
//! height override in particular must stay behind [`is_genesis`] and
//! [`GENESIS_DISPLAY_HEIGHT`]: it is a display-layer patch for a known
//! inconsistency in the chain data, not a business rule, and it must not
//! leak anywhere else.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Identifier of the Proofgold genesis block.
///
/// The daemon reports a different height for this one block than the page
/// has always displayed. The explorer pins the displayed value instead of
/// trusting the record.
pub const GENESIS_BLOCK_ID: &str =
    "146d68bb8ee74c7a777e4efae7534e5ed3250ff2c3122e654fc4232cfdae5423";

/// Height shown for the genesis block, regardless of what the daemon says.
pub const GENESIS_DISPLAY_HEIGHT: u64 = 1;

/// True when `id` names the genesis block.
pub fn is_genesis(id: &str) -> bool {
    id == GENESIS_BLOCK_ID
}

// ---------------------------------------------------------------------------
// Daemon RPC
// ---------------------------------------------------------------------------

/// The daemon command that resolves an identifier to a record envelope.
pub const QUERY_COMMAND: &str = "querymg";

/// Default address of the Proofgold daemon's query socket.
pub const DEFAULT_DAEMON_ADDR: &str = "127.0.0.1:21810";

/// Time limit for one complete daemon exchange (connect, write, read).
/// A page view issues at most two of these, sequentially.
pub const DAEMON_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Litecoin burn link
// ---------------------------------------------------------------------------

/// External explorer that resolves Litecoin burn transactions.
pub const BURN_TX_EXPLORER_URL: &str = "https://blockchair.com/litecoin/transaction/";

/// Fixed label prefix on the burn-transaction link.
pub const BURN_TX_LABEL_PREFIX: &str = "LBT:";

/// Number of leading characters of the burn txid shown in the link label.
pub const BURN_TX_LABEL_CHARS: usize = 5;

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Placeholder for cells with nothing to show (no predecessor, no burn tx).
pub const EMPTY_CELL: &str = "—";

/// Format string for the block creation time. Always UTC; the trailing
/// "GMT" is a literal.
pub const CREATION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S GMT";

/// Path of the block page served by this crate's web front end.
pub const BLOCK_PAGE_PATH: &str = "/block";

/// Path of the generic record-lookup view. Non-block identifiers are
/// redirected there with the identifier passed through unchanged.
pub const GENERIC_LOOKUP_PATH: &str = "/q";

// ---------------------------------------------------------------------------
// Server defaults
// ---------------------------------------------------------------------------

/// Default port for the block page server.
pub const DEFAULT_HTTP_PORT: u16 = 8245;

/// Default port for the Prometheus metrics endpoint.
pub const DEFAULT_METRICS_PORT: u16 = 8246;

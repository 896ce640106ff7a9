//! The injected wallet host.

use async_trait::async_trait;
use ckb_wallet_types::{CellPage, JsonBytes, Script, Transaction};

use crate::error::Error;

/// Signatures returned by the host: ordered pairs of witness index and
/// signature, the signature absent when the host skipped that group.
pub type GroupedSignatures = Vec<(usize, Option<JsonBytes>)>;

/// The wallet host a provider drives.
///
/// Implementations bridge to whatever holds the keys and the cell index:
/// a browser extension, a hardware-wallet daemon, or a node-side indexer.
#[async_trait]
pub trait WalletRpc {
    /// Fetches one page of the wallet's live cells.
    ///
    /// The first page is requested with `None`, every later page with the
    /// previous page's `last_cursor`, strictly in sequence. An empty
    /// `objects` list marks the end of the wallet's cells.
    async fn get_live_cells(&self, after_cursor: Option<JsonBytes>) -> Result<CellPage, Error>;

    /// The wallet's internal-chain change lock, when it can provide one.
    async fn get_change_lock(&self) -> Result<Option<Script>, Error>;

    /// Signs the finalized transaction, one signature per lock group.
    async fn sign_transaction(&self, tx: &Transaction) -> Result<GroupedSignatures, Error>;

    /// Decodes a full-format address into its lock script.
    fn parse_address(&self, address: &str) -> Result<Script, Error>;
}

//! Live-cell traversal.

use std::collections::VecDeque;

use ckb_wallet_types::{Cell, JsonBytes, Script};
use log::trace;

use crate::error::Error;
use crate::rpc::WalletRpc;

/// A single-pass traversal of the wallet's live cells.
///
/// Pages are pulled lazily and cells yielded one at a time; an empty page
/// from the host ends the sequence for good, whatever cursor it carries.
/// Restarting means constructing a new collector.
pub struct LiveCellCollector<'a, R: WalletRpc + ?Sized> {
    rpc: &'a R,
    lock: Option<Script>,
    cursor: Option<JsonBytes>,
    buffer: VecDeque<Cell>,
    exhausted: bool,
}

impl<'a, R: WalletRpc + ?Sized> LiveCellCollector<'a, R> {
    /// Creates a collector over all wallet cells, or over the cells held
    /// by one lock when a filter is given.
    pub fn new(rpc: &'a R, lock: Option<Script>) -> Self {
        LiveCellCollector {
            rpc,
            lock,
            cursor: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Yields the next matching cell, `None` once the wallet is drained.
    ///
    /// A page whose cells are all filtered away keeps fetching; only an
    /// empty page terminates. Host failures surface here: cells yielded
    /// before the failure stay valid and the cursor is not advanced past
    /// the failed fetch.
    pub async fn next(&mut self) -> Result<Option<Cell>, Error> {
        loop {
            if let Some(cell) = self.buffer.pop_front() {
                return Ok(Some(cell));
            }
            if self.exhausted {
                return Ok(None);
            }
            let page = self.rpc.get_live_cells(self.cursor.clone()).await?;
            if page.objects.is_empty() {
                self.exhausted = true;
                return Ok(None);
            }
            trace!("live-cell page with {} cells", page.objects.len());
            self.cursor = Some(page.last_cursor);
            let lock = &self.lock;
            self.buffer.extend(
                page.objects
                    .into_iter()
                    .filter(|cell| lock.as_ref().map_or(true, |l| cell.lock() == l)),
            );
        }
    }
}

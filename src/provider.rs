//! The provider: capacity injection, fee convergence, and the signing flow.

use std::collections::HashSet;

use ckb_wallet_types::{
    Capacity, Cell, CellOutput, FeeRate, JsonBytes, LockLike, OutPoint, Script,
    TransactionSkeleton, WitnessArgs,
};
use log::debug;

use crate::collector::LiveCellCollector;
use crate::error::Error;
use crate::rpc::WalletRpc;
use crate::signing::prepare_signing_entries;

/// Fee rate assumed when the caller does not give one, in shannons per
/// 1000 bytes.
pub const DEFAULT_FEE_RATE: FeeRate = FeeRate::from_u64(1000);

/*
 * Definitions
 */

/// Options for [`WalletProvider::inject_capacity`].
#[derive(Debug, Clone)]
pub struct InjectCapacityOptions {
    /// Capacity the selected inputs must cover, in shannons.
    pub amount: Capacity,
    /// Restrict selection to cells under this lock; `None` draws from the
    /// whole wallet.
    pub lock: Option<LockLike>,
}

/// Who pays the fee.
#[derive(Debug, Clone)]
pub enum PayBy {
    /// Probe the listed payers in order, optionally falling back to any
    /// wallet cell.
    Payers {
        /// Candidate payer locks, tried in order.
        payers: Vec<LockLike>,
        /// Whether exhausting the payers falls back to the whole wallet.
        auto_inject: bool,
    },
    /// Draw the fee from any wallet cell.
    Auto,
}

impl Default for PayBy {
    fn default() -> Self {
        PayBy::Auto
    }
}

/// Options for [`WalletProvider::pay_fee`].
#[derive(Debug, Clone, Default)]
pub struct PayFeeOptions {
    /// Fee rate to converge on, [`DEFAULT_FEE_RATE`] when absent.
    pub fee_rate: Option<FeeRate>,
    /// Fee-paying policy.
    pub pay_by: PayBy,
}

/// Assembles, funds, and signs transactions against an injected wallet
/// host.
///
/// The provider holds no transaction state of its own: every operation
/// borrows a caller-owned [`TransactionSkeleton`] and returns the next
/// version of it, leaving the argument untouched.
#[derive(Debug)]
pub struct WalletProvider<R> {
    rpc: R,
}

/*
 * Implementations.
 */

impl<R> WalletProvider<R> {
    /// Creates a provider over the given host.
    pub fn new(rpc: R) -> Self {
        WalletProvider { rpc }
    }

    /// The underlying host.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }
}

impl<R: WalletRpc> WalletProvider<R> {
    /// Starts a single-pass traversal of the wallet's live cells,
    /// restricted to one lock when a filter is given.
    pub fn collector(&self, lock: Option<Script>) -> LiveCellCollector<'_, R> {
        LiveCellCollector::new(&self.rpc, lock)
    }

    fn normalize_lock(&self, lock: &LockLike) -> Result<Script, Error> {
        match lock {
            LockLike::Script(script) => Ok(script.clone()),
            LockLike::Address(address) => self.rpc.parse_address(address),
        }
    }

    /// Selects wallet cells until they cover `amount` plus a change cell's
    /// own storage cost, then returns a new skeleton with the selected
    /// inputs, their witnesses, and a change output appended.
    ///
    /// Cells the skeleton already consumes are skipped, so injecting into
    /// an already funded skeleton draws fresh cells. The change output
    /// receives everything selected beyond `amount`, so it always covers
    /// its own storage. Appended witnesses keep the witness list aligned
    /// with inputs: the first input of each lock group, counting inputs
    /// already in the skeleton, carries the signature-placeholder witness
    /// and the rest the empty witness, so the size fed to fee math already
    /// prices the signatures in.
    ///
    /// Fails with [`Error::NoChangeLock`] before any cell is fetched when
    /// the host has no internal change lock, and with
    /// [`Error::InsufficientCells`] when the wallet runs out first. The
    /// caller's skeleton is never modified on any path.
    pub async fn inject_capacity(
        &self,
        skeleton: &TransactionSkeleton,
        options: InjectCapacityOptions,
    ) -> Result<TransactionSkeleton, Error> {
        let change_lock = self
            .rpc
            .get_change_lock()
            .await?
            .ok_or(Error::NoChangeLock)?;
        let min_change = CellOutput::new(Capacity::zero(), change_lock.clone(), None)
            .occupied_capacity(Capacity::zero())?;
        let required = options.amount.safe_add(min_change)?;

        let payer = options
            .lock
            .as_ref()
            .map(|lock| self.normalize_lock(lock))
            .transpose()?;

        let committed: HashSet<&OutPoint> = skeleton
            .inputs()
            .iter()
            .filter_map(|cell| cell.out_point.as_ref())
            .collect();

        let mut collector = self.collector(payer);
        let mut selected: Vec<Cell> = Vec::new();
        let mut total = Capacity::zero();
        while total < required {
            match collector.next().await? {
                Some(cell) => {
                    let spent = cell
                        .out_point
                        .as_ref()
                        .map_or(false, |out_point| committed.contains(out_point));
                    if spent {
                        continue;
                    }
                    total = total.safe_add(cell.capacity())?;
                    selected.push(cell);
                }
                None => return Err(Error::InsufficientCells),
            }
        }
        debug!(
            "selected {} cells holding {} shannons to cover {}",
            selected.len(),
            total,
            required
        );

        let change = total.safe_sub(options.amount)?;
        debug_assert!(change >= min_change);

        let mut seen: HashSet<&Script> = skeleton.inputs().iter().map(Cell::lock).collect();
        let witnesses: Vec<JsonBytes> = selected
            .iter()
            .map(|cell| {
                if seen.insert(cell.lock()) {
                    JsonBytes::from_vec(WitnessArgs::lock_placeholder().serialize())
                } else {
                    JsonBytes::default()
                }
            })
            .collect();

        let change_cell = Cell {
            cell_output: CellOutput::new(change, change_lock, None),
            out_point: None,
            data: JsonBytes::default(),
        };

        Ok(skeleton
            .as_builder()
            .inputs(selected)
            .witnesses(witnesses)
            .output(change_cell)
            .build())
    }

    /// Grows the skeleton until the fee it pays covers its own size.
    ///
    /// Each round recomputes the fee from the current in-block size and
    /// injects that amount into the caller's original skeleton, so rounds
    /// replace one another instead of compounding; the loop ends once an
    /// injection stops growing the transaction. Configured payers are
    /// probed in order, an individual payer's failure only moves on to the
    /// next; a failure of the whole-wallet fallback aborts.
    pub async fn pay_fee(
        &self,
        skeleton: &TransactionSkeleton,
        options: PayFeeOptions,
    ) -> Result<TransactionSkeleton, Error> {
        let fee_rate = options.fee_rate.unwrap_or(DEFAULT_FEE_RATE);
        let (payers, auto_inject) = match options.pay_by {
            PayBy::Payers {
                payers,
                auto_inject,
            } => {
                if payers.is_empty() && !auto_inject {
                    return Err(Error::NoPayerConfigured);
                }
                (payers, auto_inject)
            }
            PayBy::Auto => (Vec::new(), true),
        };

        let mut funded = skeleton.clone();
        let mut size = 0;
        let mut current = skeleton.serialized_size_in_block()?;
        while current > size {
            size = current;
            let fee = fee_rate.fee(size);
            debug!("covering a fee of {} shannons for {} bytes", fee, size);

            let mut injected = None;
            for payer in &payers {
                let options = InjectCapacityOptions {
                    amount: fee,
                    lock: Some(payer.clone()),
                };
                match self.inject_capacity(skeleton, options).await {
                    Ok(next) => {
                        injected = Some(next);
                        break;
                    }
                    Err(error) => debug!("payer skipped: {}", error),
                }
            }
            if injected.is_none() && auto_inject {
                let options = InjectCapacityOptions {
                    amount: fee,
                    lock: None,
                };
                injected = Some(self.inject_capacity(skeleton, options).await?);
            }
            funded = injected.ok_or(Error::NoPayerAvailable)?;
            current = funded.serialized_size_in_block()?;
        }
        Ok(funded)
    }

    /// Finalizes signing: prepares the signing entries, asks the host to
    /// sign once, and weaves each returned signature into the lock field
    /// of the witness it belongs to.
    ///
    /// Pairs whose signature is absent leave their witness and entry
    /// alone; woven entries are removed. An index outside the witness list
    /// is rejected with [`Error::Signature`].
    pub async fn sign_transaction(
        &self,
        skeleton: &TransactionSkeleton,
    ) -> Result<TransactionSkeleton, Error> {
        let prepared = prepare_signing_entries(skeleton)?;
        let tx = prepared.build_transaction()?;
        let signatures = self.rpc.sign_transaction(&tx).await?;

        let mut witnesses = prepared.witnesses().to_vec();
        let mut signed: HashSet<usize> = HashSet::new();
        for (index, signature) in signatures {
            let signature = match signature {
                Some(signature) => signature,
                None => continue,
            };
            let witness = witnesses
                .get_mut(index)
                .ok_or_else(|| Error::Signature(format!("witness index {} out of range", index)))?;
            let mut args = WitnessArgs::from_slice(witness.as_bytes())?;
            args.lock = Some(signature);
            *witness = JsonBytes::from_vec(args.serialize());
            signed.insert(index);
        }

        let entries = prepared
            .signing_entries()
            .iter()
            .filter(|entry| !signed.contains(&entry.index))
            .cloned()
            .collect();

        Ok(prepared
            .as_builder()
            .set_witnesses(witnesses)
            .set_signing_entries(entries)
            .build())
    }
}

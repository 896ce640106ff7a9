//! Skeleton predicates.

use ckb_wallet_types::{FeeRate, TransactionSkeleton};

use crate::error::Error;

/// Whether the capacity the skeleton draws from inputs over outputs
/// already covers the fee its current in-block size demands.
pub fn is_transaction_fee_paid(
    skeleton: &TransactionSkeleton,
    fee_rate: FeeRate,
) -> Result<bool, Error> {
    let inputs = skeleton.inputs_capacity()?;
    let outputs = skeleton.outputs_capacity()?;
    if inputs < outputs {
        return Ok(false);
    }
    let paid = inputs.safe_sub(outputs)?;
    Ok(paid >= fee_rate.fee(skeleton.serialized_size_in_block()?))
}

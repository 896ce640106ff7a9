//! Signing-entry preparation.

use std::collections::HashMap;

use ckb_wallet_types::{new_blake2b, Script, SigningEntry, TransactionSkeleton};

use crate::error::Error;

/// Computes one signing entry per lock group of the skeleton's inputs.
///
/// Inputs are grouped by structural lock equality in first-occurrence
/// order. A group's message is the blake2b-256 digest of the transaction
/// hash followed by every witness of the group, each prefixed with its
/// byte length as a little-endian u64; the group's first witness is
/// expected to already carry the signature placeholder in its lock field.
/// The entry points at that first witness. Entries are appended, existing
/// ones are kept.
pub fn prepare_signing_entries(
    skeleton: &TransactionSkeleton,
) -> Result<TransactionSkeleton, Error> {
    let tx_hash = skeleton.build_transaction()?.hash();

    let mut groups: Vec<(&Script, Vec<usize>)> = Vec::new();
    let mut group_of: HashMap<&Script, usize> = HashMap::new();
    for (index, cell) in skeleton.inputs().iter().enumerate() {
        let lock = cell.lock();
        match group_of.get(lock) {
            Some(&at) => groups[at].1.push(index),
            None => {
                group_of.insert(lock, groups.len());
                groups.push((lock, vec![index]));
            }
        }
    }

    let mut entries = Vec::with_capacity(groups.len());
    for (_, indices) in groups {
        let mut hasher = new_blake2b();
        hasher.update(tx_hash.as_bytes());
        for index in &indices {
            let witness = skeleton
                .witnesses()
                .get(*index)
                .cloned()
                .unwrap_or_default();
            hasher.update(&(witness.len() as u64).to_le_bytes());
            hasher.update(witness.as_bytes());
        }
        let mut message = [0u8; 32];
        hasher.finalize(&mut message);
        entries.push(SigningEntry {
            index: indices[0],
            message: message.into(),
        });
    }

    Ok(skeleton.as_builder().signing_entries(entries).build())
}

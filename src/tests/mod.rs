//! Scenario tests against an in-memory wallet host.

mod collector;
mod signing;

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use ckb_wallet_types::{
    capacity_bytes, Capacity, Cell, CellOutput, CellPage, FeeRate, JsonBytes, OutPoint, Script,
    ScriptHashType, Transaction, TransactionSkeleton, WitnessArgs, H256,
};

use crate::error::Error;
use crate::provider::{
    InjectCapacityOptions, PayBy, PayFeeOptions, WalletProvider, DEFAULT_FEE_RATE,
};
use crate::rpc::{GroupedSignatures, WalletRpc};
use crate::signing::prepare_signing_entries;
use crate::util::is_transaction_fee_paid;

/// In-memory host: serves `pages` in order with anything past the end
/// being the empty page, records every cursor it is asked with, and signs
/// by filling each non-empty witness with a fixed 65-byte signature.
#[derive(Default)]
pub(crate) struct MockWallet {
    pub(crate) pages: Vec<Vec<Cell>>,
    pub(crate) change_lock: Option<Script>,
    pub(crate) addresses: HashMap<String, Script>,
    pub(crate) fail_at_fetch: Option<usize>,
    pub(crate) sign_response: Option<GroupedSignatures>,
    pub(crate) cursors_seen: Mutex<Vec<Option<JsonBytes>>>,
}

impl MockWallet {
    pub(crate) fn fetch_count(&self) -> usize {
        self.cursors_seen.lock().unwrap().len()
    }

    pub(crate) fn cursors(&self) -> Vec<Option<JsonBytes>> {
        self.cursors_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletRpc for MockWallet {
    async fn get_live_cells(&self, after_cursor: Option<JsonBytes>) -> Result<CellPage, Error> {
        let call = {
            let mut seen = self.cursors_seen.lock().unwrap();
            seen.push(after_cursor.clone());
            seen.len() - 1
        };
        if self.fail_at_fetch == Some(call) {
            return Err(Error::Rpc(anyhow!("live-cell page fetch failed")));
        }
        let index = after_cursor.map_or(0, |cursor| cursor.as_bytes()[0] as usize);
        Ok(CellPage {
            objects: self.pages.get(index).cloned().unwrap_or_default(),
            last_cursor: JsonBytes::from_vec(vec![index as u8 + 1]),
        })
    }

    async fn get_change_lock(&self) -> Result<Option<Script>, Error> {
        Ok(self.change_lock.clone())
    }

    async fn sign_transaction(&self, tx: &Transaction) -> Result<GroupedSignatures, Error> {
        if let Some(response) = &self.sign_response {
            return Ok(response.clone());
        }
        Ok(tx
            .witnesses
            .iter()
            .enumerate()
            .map(|(index, witness)| (index, (!witness.is_empty()).then(mock_signature)))
            .collect())
    }

    fn parse_address(&self, address: &str) -> Result<Script, Error> {
        self.addresses
            .get(address)
            .cloned()
            .ok_or_else(|| Error::InvalidAddress(address.to_string()))
    }
}

pub(crate) fn wallet(change_lock: &Script, pages: Vec<Vec<Cell>>) -> MockWallet {
    MockWallet {
        pages,
        change_lock: Some(change_lock.clone()),
        ..MockWallet::default()
    }
}

pub(crate) fn mock_signature() -> JsonBytes {
    JsonBytes::from_vec(vec![0x55; 65])
}

pub(crate) fn secp_lock(seed: u8) -> Script {
    Script::new(
        H256([seed; 32]),
        ScriptHashType::Type,
        JsonBytes::from_vec(vec![seed; 20]),
    )
}

pub(crate) fn lock_cell(lock: &Script, capacity: Capacity, index: u32) -> Cell {
    Cell {
        cell_output: CellOutput::new(capacity, lock.clone(), None),
        out_point: Some(OutPoint::new(H256([0xee; 32]), index)),
        data: JsonBytes::default(),
    }
}

pub(crate) fn output_cell(lock: &Script, capacity: Capacity) -> Cell {
    Cell {
        cell_output: CellOutput::new(capacity, lock.clone(), None),
        out_point: None,
        data: JsonBytes::default(),
    }
}

pub(crate) fn placeholder_witness() -> JsonBytes {
    JsonBytes::from_vec(WitnessArgs::lock_placeholder().serialize())
}

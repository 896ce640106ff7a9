//! Cells, the outputs that hold them, and live-cell pages.

use ckb_wallet_capacity::{Capacity, Result as CapacityResult};
use serde::{Deserialize, Serialize};

use crate::bytes::JsonBytes;
use crate::hash::H256;
use crate::script::Script;

/// A reference to an output of a committed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutPoint {
    /// Hash of the transaction that created the cell.
    pub tx_hash: H256,
    /// Output index inside that transaction.
    pub index: u32,
}

impl OutPoint {
    /// Creates an out-point.
    pub fn new(tx_hash: H256, index: u32) -> Self {
        OutPoint { tx_hash, index }
    }
}

/// A consumed out-point together with its maturity constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellInput {
    /// Absolute or relative maturity constraint, 0 when unconstrained.
    pub since: u64,
    /// The live cell being consumed.
    pub previous_output: OutPoint,
}

/// How a dep out-point is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    /// The dep cell itself carries the code.
    Code,
    /// The dep cell carries a vector of out-points to expand.
    DepGroup,
}

impl Default for DepType {
    fn default() -> Self {
        DepType::Code
    }
}

impl From<DepType> for u8 {
    fn from(v: DepType) -> u8 {
        match v {
            DepType::Code => 0,
            DepType::DepGroup => 1,
        }
    }
}

/// A dependency cell the transaction relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellDep {
    /// Where the dep cell lives.
    pub out_point: OutPoint,
    /// How the dep cell is interpreted.
    pub dep_type: DepType,
}

/// The creation half of a cell: its capacity, lock and optional type script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellOutput {
    /// Total capacity the cell holds, in shannons.
    pub capacity: Capacity,
    /// Ownership script.
    pub lock: Script,
    /// Optional type script.
    #[serde(rename = "type")]
    pub type_: Option<Script>,
}

impl CellOutput {
    /// Creates an output.
    pub fn new(capacity: Capacity, lock: Script, type_: Option<Script>) -> Self {
        CellOutput {
            capacity,
            lock,
            type_,
        }
    }

    /// Capacity the cell's own storage consumes: the 8-byte capacity field,
    /// the data, the lock, and the type script when present.
    pub fn occupied_capacity(&self, data_capacity: Capacity) -> CapacityResult<Capacity> {
        Capacity::bytes(8)
            .and_then(|x| x.safe_add(data_capacity))
            .and_then(|x| self.lock.occupied_capacity().and_then(|y| y.safe_add(x)))
            .and_then(|x| {
                self.type_
                    .as_ref()
                    .map(|t| t.occupied_capacity().and_then(|y| y.safe_add(x)))
                    .unwrap_or(Ok(x))
            })
    }

    /// Whether the held capacity cannot even cover the cell's own storage.
    pub fn is_lack_of_capacity(&self, data_capacity: Capacity) -> CapacityResult<bool> {
        self.occupied_capacity(data_capacity)
            .map(|cap| cap > self.capacity)
    }
}

/// A cell: its output, its data, and where it lives when committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's output.
    pub cell_output: CellOutput,
    /// Where the cell lives on chain; absent for outputs not yet committed.
    pub out_point: Option<OutPoint>,
    /// The cell's data.
    pub data: JsonBytes,
}

impl Cell {
    /// Shortcut for the held capacity.
    pub fn capacity(&self) -> Capacity {
        self.cell_output.capacity
    }

    /// Shortcut for the lock script.
    pub fn lock(&self) -> &Script {
        &self.cell_output.lock
    }

    /// Capacity the cell's own storage consumes.
    pub fn occupied_capacity(&self) -> CapacityResult<Capacity> {
        Capacity::bytes(self.data.len())
            .and_then(|data_capacity| self.cell_output.occupied_capacity(data_capacity))
    }

    /// Whether the held capacity cannot cover the cell's own storage.
    pub fn is_lack_of_capacity(&self) -> CapacityResult<bool> {
        Capacity::bytes(self.data.len())
            .and_then(|data_capacity| self.cell_output.is_lack_of_capacity(data_capacity))
    }

    /// A cell guarded by its lock alone: no type script and no data.
    pub fn is_lock_only(&self) -> bool {
        self.cell_output.type_.is_none() && self.data.is_empty()
    }
}

/// One page of live cells returned by the wallet host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPage {
    /// Cells in this page; an empty page signals exhaustion.
    pub objects: Vec<Cell>,
    /// Opaque cursor the next page is requested with.
    pub last_cursor: JsonBytes,
}

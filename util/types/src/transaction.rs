//! The wire transaction and the skeleton it is assembled in.

use ckb_wallet_capacity::{Capacity, Result as CapacityResult};
use serde::{Deserialize, Serialize};

use crate::bytes::JsonBytes;
use crate::cell::{Cell, CellDep, CellInput, CellOutput};
use crate::constants::{SECP_SIGNATURE_LEN, TX_VERSION};
use crate::error::SkeletonError;
use crate::hash::H256;

/*
 * Definitions
 */

/// A complete transaction in its wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Reserved version field, currently 0.
    pub version: u32,
    /// Dependency cells.
    pub cell_deps: Vec<CellDep>,
    /// Dependency headers.
    pub header_deps: Vec<H256>,
    /// Consumed live cells.
    pub inputs: Vec<CellInput>,
    /// Created cells.
    pub outputs: Vec<CellOutput>,
    /// Data of each created cell, positionally.
    pub outputs_data: Vec<JsonBytes>,
    /// One witness per input, positionally.
    pub witnesses: Vec<JsonBytes>,
}

/// The witness layout carrying lock and type arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WitnessArgs {
    /// Lock-script argument, for secp256k1 locks the signature.
    pub lock: Option<JsonBytes>,
    /// Type-script argument of the consumed cell.
    pub input_type: Option<JsonBytes>,
    /// Type-script argument of the created cell.
    pub output_type: Option<JsonBytes>,
}

impl WitnessArgs {
    /// A witness whose lock field reserves room for a secp256k1 signature.
    pub fn lock_placeholder() -> Self {
        WitnessArgs {
            lock: Some(JsonBytes::from_vec(vec![0u8; SECP_SIGNATURE_LEN])),
            input_type: None,
            output_type: None,
        }
    }
}

/// One pending signature: which witness it belongs to and what to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningEntry {
    /// Index of the witness the signature is woven into.
    pub index: usize,
    /// Digest the wallet signs.
    pub message: H256,
}

/// The caller-owned value a transaction is assembled in.
///
/// A skeleton is a plain value: every operation reads one version and
/// returns the next, nothing retains it in between. Inputs are full cells
/// so capacity sums and witness grouping never need a chain lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSkeleton {
    pub(crate) cell_deps: Vec<CellDep>,
    pub(crate) header_deps: Vec<H256>,
    pub(crate) inputs: Vec<Cell>,
    pub(crate) outputs: Vec<Cell>,
    pub(crate) witnesses: Vec<JsonBytes>,
    pub(crate) signing_entries: Vec<SigningEntry>,
}

/// Builder for [`TransactionSkeleton`].
#[derive(Debug, Clone, Default)]
pub struct TransactionSkeletonBuilder {
    pub(crate) cell_deps: Vec<CellDep>,
    pub(crate) header_deps: Vec<H256>,
    pub(crate) inputs: Vec<Cell>,
    pub(crate) outputs: Vec<Cell>,
    pub(crate) witnesses: Vec<JsonBytes>,
    pub(crate) signing_entries: Vec<SigningEntry>,
}

/*
 * Implementations.
 */

macro_rules! def_setter_for_vector {
    ($field:ident, $type:ident, $func_push:ident, $func_extend:ident, $func_set:ident) => {
        pub fn $func_push(mut self, v: $type) -> Self {
            self.$field.push(v);
            self
        }
        pub fn $func_extend<T>(mut self, v: T) -> Self
        where
            T: ::std::iter::IntoIterator<Item = $type>,
        {
            self.$field.extend(v);
            self
        }
        pub fn $func_set(mut self, v: Vec<$type>) -> Self {
            self.$field = v;
            self
        }
    };
}

#[allow(missing_docs)]
impl TransactionSkeletonBuilder {
    def_setter_for_vector!(cell_deps, CellDep, cell_dep, cell_deps, set_cell_deps);
    def_setter_for_vector!(header_deps, H256, header_dep, header_deps, set_header_deps);
    def_setter_for_vector!(inputs, Cell, input, inputs, set_inputs);
    def_setter_for_vector!(outputs, Cell, output, outputs, set_outputs);
    def_setter_for_vector!(witnesses, JsonBytes, witness, witnesses, set_witnesses);
    def_setter_for_vector!(
        signing_entries,
        SigningEntry,
        signing_entry,
        signing_entries,
        set_signing_entries
    );

    /// Builds the skeleton.
    pub fn build(self) -> TransactionSkeleton {
        TransactionSkeleton {
            cell_deps: self.cell_deps,
            header_deps: self.header_deps,
            inputs: self.inputs,
            outputs: self.outputs,
            witnesses: self.witnesses,
            signing_entries: self.signing_entries,
        }
    }
}

impl TransactionSkeleton {
    /// Creates an empty builder.
    pub fn new_builder() -> TransactionSkeletonBuilder {
        TransactionSkeletonBuilder::default()
    }

    /// Converts into a builder holding the same content.
    pub fn as_builder(&self) -> TransactionSkeletonBuilder {
        TransactionSkeletonBuilder {
            cell_deps: self.cell_deps.clone(),
            header_deps: self.header_deps.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            witnesses: self.witnesses.clone(),
            signing_entries: self.signing_entries.clone(),
        }
    }

    /// Dependency cells.
    pub fn cell_deps(&self) -> &[CellDep] {
        &self.cell_deps
    }

    /// Dependency headers.
    pub fn header_deps(&self) -> &[H256] {
        &self.header_deps
    }

    /// Consumed cells.
    pub fn inputs(&self) -> &[Cell] {
        &self.inputs
    }

    /// Created cells.
    pub fn outputs(&self) -> &[Cell] {
        &self.outputs
    }

    /// Witnesses, positionally aligned with inputs.
    pub fn witnesses(&self) -> &[JsonBytes] {
        &self.witnesses
    }

    /// Pending signatures.
    pub fn signing_entries(&self) -> &[SigningEntry] {
        &self.signing_entries
    }

    /// Total capacity drawn from inputs.
    pub fn inputs_capacity(&self) -> CapacityResult<Capacity> {
        self.inputs
            .iter()
            .try_fold(Capacity::zero(), |acc, cell| acc.safe_add(cell.capacity()))
    }

    /// Total capacity locked into outputs.
    pub fn outputs_capacity(&self) -> CapacityResult<Capacity> {
        self.outputs
            .iter()
            .try_fold(Capacity::zero(), |acc, cell| acc.safe_add(cell.capacity()))
    }

    /// Assembles the wire transaction this skeleton currently describes.
    ///
    /// Every input must carry an out-point; outputs contribute their data
    /// positionally; witnesses are copied verbatim.
    pub fn build_transaction(&self) -> Result<Transaction, SkeletonError> {
        let inputs = self
            .inputs
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                cell.out_point
                    .clone()
                    .map(|previous_output| CellInput {
                        since: 0,
                        previous_output,
                    })
                    .ok_or(SkeletonError::InputWithoutOutPoint { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Transaction {
            version: TX_VERSION,
            cell_deps: self.cell_deps.clone(),
            header_deps: self.header_deps.clone(),
            inputs,
            outputs: self.outputs.iter().map(|c| c.cell_output.clone()).collect(),
            outputs_data: self.outputs.iter().map(|c| c.data.clone()).collect(),
            witnesses: self.witnesses.clone(),
        })
    }

    /// In-block size of the transaction this skeleton describes.
    pub fn serialized_size_in_block(&self) -> Result<usize, SkeletonError> {
        Ok(self.build_transaction()?.serialized_size_in_block())
    }
}

//! Byte layout of the wire structures.
//!
//! Everything on the wire is a molecule value. Numbers are little-endian;
//! a fixvec is an item count followed by the items; a dynvec or table is a
//! total size, one offset per item, then the item bodies; an option is
//! absent (zero bytes) or its body. The serialized transaction is a
//! two-field table of the raw transaction and the witnesses.

use crate::bytes::JsonBytes;
use crate::cell::{CellDep, CellInput, CellOutput, OutPoint};
use crate::error::VerificationError;
use crate::hash::{blake2b_256, H256};
use crate::script::Script;
use crate::transaction::{Transaction, WitnessArgs};

const UINT32_LEN: usize = 4;

fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn write_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_u32(buf, data.len() as u32);
    buf.extend_from_slice(data);
}

fn read_u32(slice: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; UINT32_LEN];
    word.copy_from_slice(&slice[offset..offset + UINT32_LEN]);
    u32::from_le_bytes(word)
}

/// Builds a table or dynvec: total size, offsets, then the field bodies.
fn table(fields: Vec<Vec<u8>>) -> Vec<u8> {
    let header = UINT32_LEN * (fields.len() + 1);
    let total = header + fields.iter().map(Vec::len).sum::<usize>();
    let mut buf = Vec::with_capacity(total);
    write_u32(&mut buf, total as u32);
    let mut offset = header;
    for field in &fields {
        write_u32(&mut buf, offset as u32);
        offset += field.len();
    }
    for field in &fields {
        buf.extend_from_slice(field);
    }
    buf
}

/// Splits a table into its fields, validating the header.
fn read_table<'a>(
    slice: &'a [u8],
    field_count: usize,
    name: &'static str,
) -> Result<Vec<&'a [u8]>, VerificationError> {
    let header = UINT32_LEN * (field_count + 1);
    if slice.len() < header {
        return Err(VerificationError::TotalSizeNotMatch(name));
    }
    let total = read_u32(slice, 0) as usize;
    if total != slice.len() {
        return Err(VerificationError::TotalSizeNotMatch(name));
    }
    let mut offsets = Vec::with_capacity(field_count + 1);
    for i in 0..field_count {
        offsets.push(read_u32(slice, UINT32_LEN * (i + 1)) as usize);
    }
    offsets.push(total);
    if offsets[0] != header {
        return Err(VerificationError::FieldCountNotMatch(name));
    }
    for pair in offsets.windows(2) {
        if pair[0] > pair[1] || pair[1] > total {
            return Err(VerificationError::OffsetsNotMatch(name));
        }
    }
    Ok(offsets
        .windows(2)
        .map(|pair| &slice[pair[0]..pair[1]])
        .collect())
}

fn read_bytes(field: &[u8], name: &'static str) -> Result<JsonBytes, VerificationError> {
    if field.len() < UINT32_LEN {
        return Err(VerificationError::TotalSizeNotMatch(name));
    }
    let count = read_u32(field, 0) as usize;
    if field.len() != UINT32_LEN + count {
        return Err(VerificationError::TotalSizeNotMatch(name));
    }
    Ok(JsonBytes::from_vec(field[UINT32_LEN..].to_vec()))
}

impl OutPoint {
    fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.tx_hash.as_bytes());
        write_u32(buf, self.index);
    }
}

impl CellInput {
    fn write_to(&self, buf: &mut Vec<u8>) {
        write_u64(buf, self.since);
        self.previous_output.write_to(buf);
    }
}

impl CellDep {
    fn write_to(&self, buf: &mut Vec<u8>) {
        self.out_point.write_to(buf);
        buf.push(u8::from(self.dep_type));
    }
}

impl Script {
    /// Serialized wire form: a table of code hash, hash type and args.
    pub fn serialize(&self) -> Vec<u8> {
        let mut args = Vec::with_capacity(UINT32_LEN + self.args.len());
        write_bytes(&mut args, self.args.as_bytes());
        table(vec![
            self.code_hash.as_bytes().to_vec(),
            vec![u8::from(self.hash_type)],
            args,
        ])
    }
}

impl CellOutput {
    /// Serialized wire form: a table of capacity, lock and optional type.
    pub fn serialize(&self) -> Vec<u8> {
        let mut capacity = Vec::with_capacity(8);
        write_u64(&mut capacity, self.capacity.as_u64());
        table(vec![
            capacity,
            self.lock.serialize(),
            self.type_.as_ref().map(Script::serialize).unwrap_or_default(),
        ])
    }
}

impl WitnessArgs {
    /// Serialized wire form: a table of the three optional byte fields.
    pub fn serialize(&self) -> Vec<u8> {
        let field = |value: &Option<JsonBytes>| {
            value
                .as_ref()
                .map(|bytes| {
                    let mut buf = Vec::with_capacity(UINT32_LEN + bytes.len());
                    write_bytes(&mut buf, bytes.as_bytes());
                    buf
                })
                .unwrap_or_default()
        };
        table(vec![
            field(&self.lock),
            field(&self.input_type),
            field(&self.output_type),
        ])
    }

    /// Decodes the wire form. An empty slice decodes as the empty witness.
    pub fn from_slice(slice: &[u8]) -> Result<Self, VerificationError> {
        if slice.is_empty() {
            return Ok(WitnessArgs::default());
        }
        let fields = read_table(slice, 3, "WitnessArgs")?;
        let read_opt = |field: &[u8]| -> Result<Option<JsonBytes>, VerificationError> {
            if field.is_empty() {
                Ok(None)
            } else {
                read_bytes(field, "WitnessArgs").map(Some)
            }
        };
        Ok(WitnessArgs {
            lock: read_opt(fields[0])?,
            input_type: read_opt(fields[1])?,
            output_type: read_opt(fields[2])?,
        })
    }
}

impl Transaction {
    fn serialize_raw(&self) -> Vec<u8> {
        let mut version = Vec::with_capacity(UINT32_LEN);
        write_u32(&mut version, self.version);

        let mut cell_deps = Vec::new();
        write_u32(&mut cell_deps, self.cell_deps.len() as u32);
        for dep in &self.cell_deps {
            dep.write_to(&mut cell_deps);
        }

        let mut header_deps = Vec::new();
        write_u32(&mut header_deps, self.header_deps.len() as u32);
        for hash in &self.header_deps {
            header_deps.extend_from_slice(hash.as_bytes());
        }

        let mut inputs = Vec::new();
        write_u32(&mut inputs, self.inputs.len() as u32);
        for input in &self.inputs {
            input.write_to(&mut inputs);
        }

        let outputs = table(self.outputs.iter().map(CellOutput::serialize).collect());

        let outputs_data = table(
            self.outputs_data
                .iter()
                .map(|data| {
                    let mut buf = Vec::with_capacity(UINT32_LEN + data.len());
                    write_bytes(&mut buf, data.as_bytes());
                    buf
                })
                .collect(),
        );

        table(vec![
            version,
            cell_deps,
            header_deps,
            inputs,
            outputs,
            outputs_data,
        ])
    }

    /// Serialized wire form: the raw transaction and its witnesses.
    pub fn serialize(&self) -> Vec<u8> {
        let witnesses = table(
            self.witnesses
                .iter()
                .map(|witness| {
                    let mut buf = Vec::with_capacity(UINT32_LEN + witness.len());
                    write_bytes(&mut buf, witness.as_bytes());
                    buf
                })
                .collect(),
        );
        table(vec![self.serialize_raw(), witnesses])
    }

    /// Size the transaction occupies in a block.
    ///
    /// The block's transaction vector spends one more offset word on it,
    /// so the charged size is the serialized length plus 4.
    pub fn serialized_size_in_block(&self) -> usize {
        self.serialize().len() + UINT32_LEN
    }

    /// The transaction hash: blake2b-256 over the serialized raw part.
    pub fn hash(&self) -> H256 {
        H256::from(blake2b_256(self.serialize_raw()))
    }
}

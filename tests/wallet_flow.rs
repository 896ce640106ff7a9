//! Whole-flow test: draft a transfer, fund it, cover the fee, sign it.

use async_trait::async_trait;

use ckb_wallet_provider::types::{
    capacity_bytes, Capacity, Cell, CellOutput, CellPage, JsonBytes, OutPoint, Script,
    ScriptHashType, Transaction, TransactionSkeleton, WitnessArgs, H256,
};
use ckb_wallet_provider::{
    is_transaction_fee_paid, Error, GroupedSignatures, InjectCapacityOptions, PayFeeOptions,
    WalletProvider, WalletRpc, DEFAULT_FEE_RATE,
};

struct DemoWallet {
    pages: Vec<Vec<Cell>>,
    change_lock: Script,
}

#[async_trait]
impl WalletRpc for DemoWallet {
    async fn get_live_cells(&self, after_cursor: Option<JsonBytes>) -> Result<CellPage, Error> {
        let index = after_cursor.map_or(0, |cursor| cursor.as_bytes()[0] as usize);
        Ok(CellPage {
            objects: self.pages.get(index).cloned().unwrap_or_default(),
            last_cursor: JsonBytes::from_vec(vec![index as u8 + 1]),
        })
    }

    async fn get_change_lock(&self) -> Result<Option<Script>, Error> {
        Ok(Some(self.change_lock.clone()))
    }

    async fn sign_transaction(&self, tx: &Transaction) -> Result<GroupedSignatures, Error> {
        Ok(tx
            .witnesses
            .iter()
            .enumerate()
            .map(|(index, witness)| {
                let signature = (!witness.is_empty()).then(|| JsonBytes::from_vec(vec![0x77; 65]));
                (index, signature)
            })
            .collect())
    }

    fn parse_address(&self, address: &str) -> Result<Script, Error> {
        Err(Error::InvalidAddress(address.to_string()))
    }
}

fn lock(seed: u8) -> Script {
    Script::new(
        H256([seed; 32]),
        ScriptHashType::Type,
        JsonBytes::from_vec(vec![seed; 20]),
    )
}

fn wallet_cell(lock: &Script, capacity: Capacity, index: u32) -> Cell {
    Cell {
        cell_output: CellOutput::new(capacity, lock.clone(), None),
        out_point: Some(OutPoint::new(H256([0xcc; 32]), index)),
        data: JsonBytes::default(),
    }
}

#[tokio::test]
async fn transfer_flow_funds_pays_and_signs() {
    let owner = lock(1);
    let change = lock(9);
    let recipient = lock(2);

    let host = DemoWallet {
        pages: vec![
            vec![
                wallet_cell(&owner, capacity_bytes!(70), 0),
                wallet_cell(&owner, capacity_bytes!(80), 1),
            ],
            vec![
                wallet_cell(&owner, capacity_bytes!(300), 2),
                wallet_cell(&owner, capacity_bytes!(70), 3),
            ],
        ],
        change_lock: change.clone(),
    };
    let provider = WalletProvider::new(host);

    // the caller drafts a 100 CKB transfer
    let draft = TransactionSkeleton::new_builder()
        .output(Cell {
            cell_output: CellOutput::new(capacity_bytes!(100), recipient.clone(), None),
            out_point: None,
            data: JsonBytes::default(),
        })
        .build();

    // funding balances the draft: the change output absorbs the surplus
    let funded = provider
        .inject_capacity(
            &draft,
            InjectCapacityOptions {
                amount: capacity_bytes!(100),
                lock: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(funded.inputs().len(), 3);
    assert_eq!(
        funded.inputs_capacity().unwrap(),
        funded.outputs_capacity().unwrap()
    );
    assert_eq!(funded.outputs()[1].lock(), &change);

    // fee payment draws a cell the funding pass did not consume
    let paid = provider
        .pay_fee(&funded, PayFeeOptions::default())
        .await
        .unwrap();
    assert_eq!(paid.inputs().len(), 4);
    assert!(is_transaction_fee_paid(&paid, DEFAULT_FEE_RATE).unwrap());

    let signed = provider.sign_transaction(&paid).await.unwrap();
    assert!(signed.signing_entries().is_empty());

    let tx = signed.build_transaction().unwrap();
    assert_eq!(tx.inputs.len(), 4);
    assert_eq!(tx.witnesses.len(), tx.inputs.len());

    // the lock group's witness carries the host's signature, length intact
    let woven = WitnessArgs::from_slice(tx.witnesses[0].as_bytes()).unwrap();
    assert_eq!(woven.lock, Some(JsonBytes::from_vec(vec![0x77; 65])));
    assert!(tx.witnesses[1].is_empty());

    // balanced up to the fee the final size demands
    let fee = paid
        .inputs_capacity()
        .unwrap()
        .safe_sub(paid.outputs_capacity().unwrap())
        .unwrap();
    assert_eq!(
        fee,
        DEFAULT_FEE_RATE.fee(paid.serialized_size_in_block().unwrap())
    );
}

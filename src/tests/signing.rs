use super::*;

#[test]
fn entries_cover_each_lock_group_once() {
    let alpha = secp_lock(1);
    let beta = secp_lock(2);
    let skeleton = TransactionSkeleton::new_builder()
        .input(lock_cell(&alpha, capacity_bytes!(100), 0))
        .input(lock_cell(&beta, capacity_bytes!(100), 1))
        .input(lock_cell(&alpha, capacity_bytes!(100), 2))
        .witness(placeholder_witness())
        .witness(placeholder_witness())
        .witness(JsonBytes::default())
        .build();

    let prepared = prepare_signing_entries(&skeleton).unwrap();
    let entries = prepared.signing_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].index, 0);
    assert_eq!(entries[1].index, 1);
    assert_ne!(entries[0].message, entries[1].message);
}

#[test]
fn messages_are_deterministic_and_track_the_transaction() {
    let owner = secp_lock(1);
    let skeleton = TransactionSkeleton::new_builder()
        .input(lock_cell(&owner, capacity_bytes!(100), 0))
        .witness(placeholder_witness())
        .build();

    let first = prepare_signing_entries(&skeleton).unwrap();
    let again = prepare_signing_entries(&skeleton).unwrap();
    assert_eq!(first.signing_entries(), again.signing_entries());

    let changed = skeleton
        .as_builder()
        .output(output_cell(&secp_lock(2), capacity_bytes!(61)))
        .build();
    let other = prepare_signing_entries(&changed).unwrap();
    assert_ne!(
        first.signing_entries()[0].message,
        other.signing_entries()[0].message
    );
}

#[tokio::test]
async fn sign_transaction_weaves_signatures_and_drains_entries() {
    let owner = secp_lock(1);
    let provider = WalletProvider::new(wallet(&secp_lock(7), Vec::new()));
    let skeleton = TransactionSkeleton::new_builder()
        .input(lock_cell(&owner, capacity_bytes!(100), 0))
        .input(lock_cell(&owner, capacity_bytes!(100), 1))
        .witness(placeholder_witness())
        .witness(JsonBytes::default())
        .build();

    let signed = provider.sign_transaction(&skeleton).await.unwrap();

    assert!(signed.signing_entries().is_empty());
    assert_eq!(signed.witnesses().len(), 2);
    // a 65-byte signature replaces the 65-byte placeholder in place
    assert_eq!(signed.witnesses()[0].len(), 85);
    let woven = WitnessArgs::from_slice(signed.witnesses()[0].as_bytes()).unwrap();
    assert_eq!(woven.lock, Some(mock_signature()));
    assert!(signed.witnesses()[1].is_empty());
}

#[tokio::test]
async fn skipped_signatures_keep_their_entries() {
    let owner = secp_lock(1);
    let mut host = wallet(&secp_lock(7), Vec::new());
    host.sign_response = Some(vec![(0, None)]);
    let provider = WalletProvider::new(host);
    let skeleton = TransactionSkeleton::new_builder()
        .input(lock_cell(&owner, capacity_bytes!(100), 0))
        .witness(placeholder_witness())
        .build();

    let signed = provider.sign_transaction(&skeleton).await.unwrap();

    assert_eq!(signed.signing_entries().len(), 1);
    assert_eq!(signed.signing_entries()[0].index, 0);
    assert_eq!(signed.witnesses()[0], placeholder_witness());
}

#[tokio::test]
async fn sign_transaction_rejects_out_of_range_indices() {
    let owner = secp_lock(1);
    let mut host = wallet(&secp_lock(7), Vec::new());
    host.sign_response = Some(vec![(5, Some(mock_signature()))]);
    let provider = WalletProvider::new(host);
    let skeleton = TransactionSkeleton::new_builder()
        .input(lock_cell(&owner, capacity_bytes!(100), 0))
        .witness(placeholder_witness())
        .build();

    let err = provider.sign_transaction(&skeleton).await.unwrap_err();
    assert!(matches!(err, Error::Signature(_)));
}

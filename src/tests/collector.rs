use super::*;

#[tokio::test]
async fn drains_pages_then_stops() {
    let owner = secp_lock(1);
    let wallet = wallet(
        &secp_lock(9),
        vec![
            vec![
                lock_cell(&owner, capacity_bytes!(100), 0),
                lock_cell(&owner, capacity_bytes!(200), 1),
            ],
            vec![lock_cell(&owner, capacity_bytes!(300), 2)],
        ],
    );
    let provider = WalletProvider::new(wallet);
    let mut collector = provider.collector(None);

    let mut capacities = Vec::new();
    while let Some(cell) = collector.next().await.unwrap() {
        capacities.push(cell.capacity());
    }
    assert_eq!(
        capacities,
        vec![
            capacity_bytes!(100),
            capacity_bytes!(200),
            capacity_bytes!(300)
        ]
    );
    // exhaustion is stable and fetches nothing further
    assert!(collector.next().await.unwrap().is_none());
    assert_eq!(provider.rpc().fetch_count(), 3);

    assert_eq!(
        provider.rpc().cursors(),
        vec![
            None,
            Some(JsonBytes::from_vec(vec![1])),
            Some(JsonBytes::from_vec(vec![2])),
        ]
    );
}

#[tokio::test]
async fn filters_by_lock() {
    let mine = secp_lock(1);
    let other = secp_lock(2);
    let wallet = wallet(
        &secp_lock(9),
        vec![
            vec![
                lock_cell(&mine, capacity_bytes!(100), 0),
                lock_cell(&other, capacity_bytes!(500), 1),
            ],
            // a page of foreign cells only must not end the traversal
            vec![lock_cell(&other, capacity_bytes!(600), 2)],
            vec![lock_cell(&mine, capacity_bytes!(200), 3)],
        ],
    );
    let provider = WalletProvider::new(wallet);

    let mut collector = provider.collector(Some(mine.clone()));
    let mut capacities = Vec::new();
    while let Some(cell) = collector.next().await.unwrap() {
        assert_eq!(cell.lock(), &mine);
        capacities.push(cell.capacity());
    }
    assert_eq!(capacities, vec![capacity_bytes!(100), capacity_bytes!(200)]);
    assert_eq!(provider.rpc().fetch_count(), 4);
}

#[tokio::test]
async fn absent_lock_drains_the_wallet_without_yielding() {
    let other = secp_lock(2);
    let wallet = wallet(
        &secp_lock(9),
        vec![
            vec![lock_cell(&other, capacity_bytes!(100), 0)],
            vec![lock_cell(&other, capacity_bytes!(200), 1)],
        ],
    );
    let provider = WalletProvider::new(wallet);

    let mut collector = provider.collector(Some(secp_lock(1)));
    assert!(collector.next().await.unwrap().is_none());
    assert_eq!(provider.rpc().fetch_count(), 3);
}

#[tokio::test]
async fn propagates_host_failure_mid_sequence() {
    let owner = secp_lock(1);
    let mut wallet = wallet(
        &secp_lock(9),
        vec![
            vec![lock_cell(&owner, capacity_bytes!(100), 0)],
            vec![lock_cell(&owner, capacity_bytes!(200), 1)],
        ],
    );
    wallet.fail_at_fetch = Some(1);
    let provider = WalletProvider::new(wallet);

    let mut collector = provider.collector(None);
    let first = collector.next().await.unwrap().unwrap();
    assert_eq!(first.capacity(), capacity_bytes!(100));
    assert!(matches!(collector.next().await, Err(Error::Rpc(_))));
}

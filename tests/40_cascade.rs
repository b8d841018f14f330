mod common;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use boothverse::auth::PlaintextVerifier;
use boothverse::config::SecurityConfig;
use boothverse::database::models::Role;
use boothverse::database::EntityStore;
use boothverse::error::BoothError;
use uuid::Uuid;

fn ids(items: impl IntoIterator<Item = Uuid>) -> HashSet<Uuid> {
    items.into_iter().collect()
}

#[tokio::test]
async fn deleting_sub_admin_removes_exactly_its_subtree() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;
    let before = harness.snapshot().await?;

    let report = harness.engine.delete_account(&demo.alice, demo.bob.id).await?;
    assert_eq!(ids(report.deleted.clone()), ids([demo.bob.id, demo.charlie.id, demo.diana.id]));
    assert_eq!(report.deleted[0], demo.bob.id);

    let after = harness.snapshot().await?;
    let remaining = ids(after.accounts.iter().map(|a| a.id));
    let expected = ids(before.accounts.iter().map(|a| a.id).filter(|id| !report.deleted.contains(id)));
    assert_eq!(remaining, expected);
    assert!(remaining.contains(&demo.alice.id));
    assert!(remaining.contains(&demo.eve.id));
    Ok(())
}

#[tokio::test]
async fn deleting_leaf_orphans_its_booths_without_touching_votes() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;
    let main_hall_a = &demo.booths[0];

    let report = harness.engine.delete_account(&demo.bob, demo.charlie.id).await?;
    assert_eq!(report.deleted, vec![demo.charlie.id]);
    assert_eq!(ids(report.orphaned_booths), ids([demo.booths[0].id, demo.booths[1].id]));

    let after = harness.snapshot().await?;
    let booth = after.booth(main_hall_a.id).expect("booth survives");
    assert_eq!(booth.assigned_to, None);
    assert_eq!(booth.selected_votes, main_hall_a.selected_votes);
    assert_eq!(booth.created_by, demo.bob.id);
    assert_eq!(after.booths.len(), 5);
    Ok(())
}

#[tokio::test]
async fn deleting_admin_cascades_through_every_layer() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    let report = harness.engine.delete_account(&demo.root, demo.alice.id).await?;
    assert_eq!(report.deleted.len(), 6);
    assert_eq!(report.orphaned_booths.len(), 4);

    let after = harness.snapshot().await?;
    assert_eq!(after.accounts.len(), 1);
    assert_eq!(after.accounts[0].role, Role::Root);
    assert!(after.booths.iter().all(|b| b.assigned_to.is_none()));
    Ok(())
}

#[tokio::test]
async fn failed_batch_leaves_nothing_applied() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let before = harness.snapshot().await?;

    let store: Arc<dyn EntityStore> = Arc::new(common::BatchlessStore(harness.store.clone()));
    let (engine, _) = common::engines(store, SecurityConfig::default(), Arc::new(PlaintextVerifier));

    let err = engine.delete_account(&harness.demo.alice, harness.demo.bob.id).await.unwrap_err();
    assert!(matches!(err, BoothError::StoreUnavailable(_)));
    assert_eq!(harness.snapshot().await?, before);
    Ok(())
}

#[tokio::test]
async fn deleting_missing_account_is_not_found() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let err = harness.engine.delete_account(&harness.demo.root, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, BoothError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn hardened_delete_refuses_out_of_scope_targets() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    // Root is never inside anyone's scope
    let err = harness.engine.delete_account(&demo.alice, demo.root.id).await.unwrap_err();
    assert!(matches!(err, BoothError::OutOfScope(_)));

    // Admin cannot skip a level
    let err = harness.engine.delete_account(&demo.alice, demo.frank.id).await.unwrap_err();
    assert!(matches!(err, BoothError::OutOfScope(_)));

    assert_eq!(harness.snapshot().await?.accounts.len(), 7);
    Ok(())
}

#[tokio::test]
async fn unhardened_delete_follows_closure_only() -> Result<()> {
    let harness = common::Harness::unhardened()?;
    let demo = &harness.demo;

    let report = harness.engine.delete_account(&demo.charlie, demo.eve.id).await?;
    assert_eq!(ids(report.deleted), ids([demo.eve.id, demo.frank.id]));
    assert_eq!(report.orphaned_booths, vec![demo.booths[3].id]);
    Ok(())
}

#[tokio::test]
async fn cascade_reads_are_never_torn() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = harness.demo.clone();
    let reader_store = harness.store.clone();

    let reader = tokio::spawn(async move {
        for _ in 0..50 {
            let snapshot = reader_store.snapshot().await.expect("snapshot");
            let bob_present = snapshot.account(demo.bob.id).is_some();
            let charlie_present = snapshot.account(demo.charlie.id).is_some();
            let main_hall_assigned = snapshot.booth(demo.booths[0].id).map(|b| b.assigned_to.is_some());
            // Either the whole cascade is visible or none of it
            assert_eq!(bob_present, charlie_present);
            assert_eq!(Some(bob_present), main_hall_assigned);
            tokio::task::yield_now().await;
        }
    });

    harness.engine.delete_account(&harness.demo.alice, harness.demo.bob.id).await?;
    reader.await?;
    Ok(())
}

#[tokio::test]
async fn deleted_actor_cannot_add_children() -> Result<()> {
    for harness in [common::Harness::hardened()?, common::Harness::unhardened()?] {
        let demo = &harness.demo;
        harness.engine.delete_account(&demo.alice, demo.bob.id).await?;
        let before = harness.snapshot().await?;

        let err = harness.engine.create_account(&demo.bob, "grace", "24680", Role::Leaf).await.unwrap_err();
        assert!(matches!(err, BoothError::OutOfScope(_)));

        let err = harness.engine.create_booth(&demo.bob, "Ghost Hall", 10, None).await.unwrap_err();
        assert!(matches!(err, BoothError::OutOfScope(_)));

        let err = harness.engine.update_booth_selection(&demo.charlie, demo.booths[1].id, &[1]).await.unwrap_err();
        assert!(matches!(err, BoothError::OutOfScope(_)));

        let after = harness.snapshot().await?;
        assert_eq!(after, before);
        assert!(after.accounts.iter().all(|a| a.created_by.map_or(true, |p| after.account(p).is_some())));
    }
    Ok(())
}

mod common;

use std::sync::Arc;

use anyhow::Result;
use boothverse::auth::PlaintextVerifier;
use boothverse::config::SecurityConfig;
use boothverse::database::models::Role;
use boothverse::database::EntityStore;
use boothverse::error::BoothError;
use boothverse::services::AccountChanges;

#[tokio::test]
async fn creation_follows_the_role_chain() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    let cases = [
        (&demo.root, Role::SubAdmin),
        (&demo.root, Role::Root),
        (&demo.alice, Role::Leaf),
        (&demo.alice, Role::Admin),
        (&demo.bob, Role::SubAdmin),
        (&demo.charlie, Role::Leaf),
    ];
    for (actor, role) in cases {
        let err = harness.engine.create_account(actor, "someone", "12345", role).await.unwrap_err();
        assert!(matches!(err, BoothError::InvalidRole(_)), "{} -> {role}: {err:?}", actor.display_name);
    }

    let admin = harness.engine.create_account(&demo.root, "Quinn", "12345", Role::Admin).await?;
    assert_eq!(admin.created_by, Some(demo.root.id));
    assert_eq!(admin.role, Role::Admin);
    Ok(())
}

#[tokio::test]
async fn duplicate_name_under_same_creator_leaves_store_unchanged() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let before = harness.snapshot().await?;

    let err = harness
        .engine
        .create_account(&harness.demo.bob, "DIANA", "11111", Role::Leaf)
        .await
        .unwrap_err();

    assert_eq!(err, BoothError::DuplicateName("DIANA".to_string()));
    assert_eq!(harness.snapshot().await?, before);
    Ok(())
}

#[tokio::test]
async fn same_leaf_name_under_another_sub_admin_is_allowed() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let leaf = harness.engine.create_account(&harness.demo.eve, "diana", "11111", Role::Leaf).await?;
    assert_eq!(leaf.created_by, Some(harness.demo.eve.id));
    Ok(())
}

#[tokio::test]
async fn admin_names_are_globally_unique() -> Result<()> {
    let harness = common::Harness::unhardened()?;

    // A second root still shares the flat admin namespace
    let other_root = boothverse::database::models::Account::new("Other-Root", "00000", Role::Root, None);
    harness.store.insert(boothverse::database::Record::Account(other_root.clone())).await?;

    let err = harness
        .engine
        .create_account(&other_root, "alice-admin", "12345", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, BoothError::DuplicateName(_)));
    Ok(())
}

#[tokio::test]
async fn rename_collision_is_duplicate_and_self_rename_is_fine() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    let err = harness
        .engine
        .update_account(
            &demo.bob,
            demo.diana.id,
            AccountChanges { display_name: Some("Charlie".into()), credential: None },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BoothError::DuplicateName(_)));

    // Changing only the case of its own name does not collide with itself
    let renamed = harness
        .engine
        .update_account(
            &demo.bob,
            demo.diana.id,
            AccountChanges { display_name: Some("Diana".into()), credential: Some("13579".into()) },
        )
        .await?;
    assert_eq!(renamed.display_name, "Diana");
    assert_eq!(renamed.credential, "13579");
    Ok(())
}

#[tokio::test]
async fn update_of_missing_account_is_not_found() -> Result<()> {
    let harness = common::Harness::unhardened()?;
    let err = harness
        .engine
        .update_account(&harness.demo.bob, uuid::Uuid::new_v4(), AccountChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BoothError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn toggle_twice_restores_active_flag() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    let once = harness.engine.toggle_account_status(&demo.alice, demo.bob.id).await?;
    assert!(!once.active);

    // Descendants keep their own flag
    let snapshot = harness.snapshot().await?;
    assert!(snapshot.account(demo.charlie.id).unwrap().active);

    let twice = harness.engine.toggle_account_status(&demo.alice, demo.bob.id).await?;
    assert_eq!(twice.active, demo.bob.active);
    Ok(())
}

#[tokio::test]
async fn hardened_engine_refuses_targets_outside_scope() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    // Eve does not manage Bob's leaves
    let err = harness.engine.toggle_account_status(&demo.eve, demo.charlie.id).await.unwrap_err();
    assert!(matches!(err, BoothError::OutOfScope(_)));

    let err = harness
        .engine
        .update_account(&demo.charlie, demo.diana.id, AccountChanges { display_name: Some("dd".into()), credential: None })
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "OUT_OF_SCOPE");
    Ok(())
}

#[tokio::test]
async fn unhardened_engine_only_checks_existence() -> Result<()> {
    let harness = common::Harness::unhardened()?;
    let demo = &harness.demo;

    let toggled = harness.engine.toggle_account_status(&demo.eve, demo.charlie.id).await?;
    assert!(!toggled.active);
    Ok(())
}

#[tokio::test]
async fn formats_are_validated() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let bob = &harness.demo.bob;

    let err = harness.engine.create_account(bob, "two words", "12345", Role::Leaf).await.unwrap_err();
    assert!(matches!(err, BoothError::InvalidInput { field: "display_name", .. }));

    let err = harness.engine.create_account(bob, "x", "12345", Role::Leaf).await.unwrap_err();
    assert!(matches!(err, BoothError::InvalidInput { field: "display_name", .. }));

    let err = harness.engine.create_account(bob, "grace", "1234", Role::Leaf).await.unwrap_err();
    assert!(matches!(err, BoothError::InvalidInput { field: "credential", .. }));
    Ok(())
}

#[tokio::test]
async fn store_failures_surface_as_store_unavailable() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let shared: Arc<dyn EntityStore> = Arc::new(common::FailingStore);
    let (engine, session) = common::engines(shared, SecurityConfig::default(), Arc::new(PlaintextVerifier));

    let err = engine.create_account(&harness.demo.bob, "grace", "24680", Role::Leaf).await.unwrap_err();
    assert!(matches!(err, BoothError::StoreUnavailable(_)));

    let err = session.login("charlie", "12345").await.unwrap_err();
    assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    Ok(())
}

mod common;

use std::collections::HashSet;

use anyhow::Result;
use boothverse::database::models::{Account, Booth, Role};
use boothverse::database::Snapshot;
use boothverse::hierarchy::{self, HierarchyResolver};
use uuid::Uuid;

fn booth_rule(snapshot: &Snapshot, identity: &Account, booth: &Booth) -> bool {
    match identity.role {
        Role::Root => true,
        Role::Admin => snapshot
            .account(booth.created_by)
            .map_or(false, |creator| creator.role == Role::SubAdmin && creator.created_by == Some(identity.id)),
        Role::SubAdmin => booth.created_by == identity.id,
        Role::Leaf => booth.assigned_to == Some(identity.id),
    }
}

fn account_rule(identity: &Account, account: &Account) -> bool {
    match identity.role {
        Role::Root => account.role == Role::Admin,
        Role::Admin => account.role == Role::SubAdmin && account.created_by == Some(identity.id),
        Role::SubAdmin => account.role == Role::Leaf && account.created_by == Some(identity.id),
        Role::Leaf => false,
    }
}

fn assert_scope_matches_rules(snapshot: &Snapshot) {
    for identity in &snapshot.accounts {
        let scope = hierarchy::resolve(snapshot, identity);

        for booth in &scope.booths {
            assert!(booth_rule(snapshot, identity, booth), "{} sees booth {}", identity.display_name, booth.name);
        }
        for account in &scope.accounts {
            assert!(account_rule(identity, account), "{} sees {}", identity.display_name, account.display_name);
        }

        // Nothing that satisfies the rule is missing either
        let visible: HashSet<Uuid> = scope.booths.iter().map(|b| b.id).collect();
        let expected: HashSet<Uuid> = snapshot
            .booths
            .iter()
            .filter(|b| booth_rule(snapshot, identity, b))
            .map(|b| b.id)
            .collect();
        assert_eq!(visible, expected, "booth scope of {}", identity.display_name);
    }
}

#[tokio::test]
async fn every_identity_sees_exactly_its_rule() -> Result<()> {
    let harness = common::Harness::hardened()?;
    assert_scope_matches_rules(&harness.snapshot().await?);
    Ok(())
}

#[tokio::test]
async fn scope_rules_hold_after_growing_the_tree() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let demo = &harness.demo;

    let admin = harness.engine.create_account(&demo.root, "Mona-Admin", "10101", Role::Admin).await?;
    let sub = harness.engine.create_account(&admin, "Milo-Sub", "20202", Role::SubAdmin).await?;
    let leaf = harness.engine.create_account(&sub, "nina", "30303", Role::Leaf).await?;
    harness.engine.create_booth(&sub, "North Gate", 40, Some(leaf.id)).await?;
    harness.engine.create_booth(&sub, "South Gate", 60, None).await?;

    let snapshot = harness.snapshot().await?;
    assert_scope_matches_rules(&snapshot);

    // Cross-branch isolation: Alice never sees Mona's sub-admin booths
    let alice_scope = hierarchy::resolve(&snapshot, &demo.alice);
    assert!(alice_scope.booths.iter().all(|b| b.created_by != sub.id));
    assert!(!alice_scope.contains_account(sub.id));
    Ok(())
}

#[tokio::test]
async fn resolver_reads_one_coherent_snapshot() -> Result<()> {
    let harness = common::Harness::hardened()?;
    let resolver = HierarchyResolver::new(harness.shared.clone());

    let bob_scope = resolver.scope(&harness.demo.bob).await?;
    assert_eq!(bob_scope.accounts.len(), 2);
    assert_eq!(bob_scope.booths.len(), 3);

    let frank_scope = resolver.scope(&harness.demo.frank).await?;
    assert!(frank_scope.accounts.is_empty());
    assert_eq!(frank_scope.booths.len(), 1);
    assert_eq!(frank_scope.booths[0].name, "West Wing");
    Ok(())
}

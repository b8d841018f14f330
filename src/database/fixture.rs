use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeSet;

use crate::auth::CredentialVerifier;
use crate::database::models::{Account, Booth, Role};
use crate::database::store::Snapshot;

/// Demo data set plus direct handles to each seeded record
#[derive(Debug, Clone)]
pub struct DemoFixture {
    pub snapshot: Snapshot,
    pub root: Account,
    pub alice: Account,
    pub bob: Account,
    pub eve: Account,
    pub charlie: Account,
    pub diana: Account,
    pub frank: Account,
    /// Main Hall A, Main Hall B, Exhibition Area, West Wing, East Wing
    pub booths: Vec<Booth>,
}

/// Seed tree with plaintext passcodes:
///
/// ```text
/// Super-Admin (root)
/// └── Alice-Admin
///     ├── Bob Sub-Admin ── charlie, diana
///     └── Eve Sub-Admin ── frank
/// ```
pub fn demo() -> DemoFixture {
    build(|raw| raw.to_string())
}

/// Same tree with credentials sealed by `verifier`
pub fn demo_sealed(verifier: &dyn CredentialVerifier) -> DemoFixture {
    build(|raw| verifier.seal(raw))
}

fn build(seal: impl Fn(&str) -> String) -> DemoFixture {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
    let mut tick = 0i64;
    let mut stamp = || {
        tick += 1;
        epoch + Duration::seconds(tick)
    };

    let mut account = |name: &str, passcode: &str, role: Role, parent: Option<&Account>| {
        let mut account = Account::new(name, seal(passcode), role, parent.map(|p| p.id));
        account.created_at = stamp();
        account.updated_at = account.created_at;
        account
    };

    let root = account("Super-Admin", "270385", Role::Root, None);
    let alice = account("Alice-Admin", "11111", Role::Admin, Some(&root));
    let bob = account("Bob Sub-Admin", "55555", Role::SubAdmin, Some(&alice));
    let charlie = account("charlie", "12345", Role::Leaf, Some(&bob));
    let diana = account("diana", "54321", Role::Leaf, Some(&bob));
    let eve = account("Eve Sub-Admin", "66666", Role::SubAdmin, Some(&alice));
    let frank = account("frank", "67890", Role::Leaf, Some(&eve));

    let mut booth = |name: &str, vote_count: u32, assignee: Option<&Account>, creator: &Account, votes: &[u32]| {
        let mut booth = Booth::new(name, vote_count, assignee.map(|a| a.id), creator.id);
        booth.selected_votes = votes.iter().copied().collect::<BTreeSet<u32>>();
        booth.created_at = stamp();
        booth.updated_at = booth.created_at;
        booth
    };

    let west_wing_votes: Vec<u32> = (10..35).collect();
    let booths = vec![
        booth("Main Hall - Section A", 100, Some(&charlie), &bob, &[5, 12, 25, 67, 89]),
        booth("Main Hall - Section B", 150, Some(&charlie), &bob, &[]),
        booth("Exhibition Area", 50, Some(&diana), &bob, &[1, 2, 3, 4, 5, 10, 20, 30, 40, 50]),
        booth("West Wing", 200, Some(&frank), &eve, &west_wing_votes),
        booth("East Wing", 1500, None, &eve, &[]),
    ];

    let accounts = vec![
        root.clone(),
        alice.clone(),
        bob.clone(),
        charlie.clone(),
        diana.clone(),
        eve.clone(),
        frank.clone(),
    ];

    DemoFixture {
        snapshot: Snapshot { accounts, booths: booths.clone() },
        root,
        alice,
        bob,
        eve,
        charlie,
        diana,
        frank,
        booths,
    }
}

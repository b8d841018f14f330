use std::collections::{HashMap, HashSet, VecDeque};
use uuid::Uuid;

use crate::database::models::{Account, Booth};

/// `created_by -> children` index over one snapshot of accounts
#[derive(Debug, Default)]
pub struct ChildIndex {
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl ChildIndex {
    pub fn build<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> Self {
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for account in accounts {
            if let Some(parent) = account.created_by {
                children.entry(parent).or_default().push(account.id);
            }
        }
        Self { children }
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `root` and every transitive descendant, in breadth-first order
    pub fn closure(&self, root: Uuid) -> Vec<Uuid> {
        let mut seen = HashSet::from([root]);
        let mut order = vec![root];
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for &child in self.children_of(current) {
                // A malformed created_by cycle must not loop forever
                if seen.insert(child) {
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }
        order
    }
}

/// Booths whose assignee is inside `closure`
pub fn orphaned_by<'a>(booths: &'a [Booth], closure: &'a HashSet<Uuid>) -> impl Iterator<Item = &'a Booth> + 'a {
    booths
        .iter()
        .filter(move |booth| booth.assigned_to.map_or(false, |id| closure.contains(&id)))
}

//! Generation inference.
//!
//! Assigns every member an integer generation from partial, possibly
//! inconsistent relation data. Child relations push the child at least one
//! generation below its parent; spouse and sibling relations pull both
//! endpoints onto the deeper of their two generations. The three rules run
//! as a bounded fixed-point iteration.

use indexmap::IndexMap;
use log::{debug, trace};

use lineage_core::{
    identifier::MemberId,
    semantic::{FamilyTree, RelationKind},
};

/// Inferred generation per member id.
///
/// Total over the members of the tree it was inferred from. Ids that appear
/// only in relations may also carry a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generations {
    values: IndexMap<MemberId, i32>,
    passes: usize,
    converged: bool,
}

impl Generations {
    /// Returns the generation of `id`, if one was inferred.
    pub fn get(&self, id: MemberId) -> Option<i32> {
        self.values.get(&id).copied()
    }

    /// Iterates over `(id, generation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MemberId, i32)> + '_ {
        self.values.iter().map(|(id, generation)| (*id, *generation))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of propagation passes that ran.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// `true` if the last pass made no change.
    pub fn converged(&self) -> bool {
        self.converged
    }

    fn set(&mut self, id: MemberId, generation: i32) {
        self.values.insert(id, generation);
    }
}

impl FromIterator<(MemberId, i32)> for Generations {
    /// Collects precomputed generations. The result counts as converged
    /// after zero passes.
    fn from_iter<I: IntoIterator<Item = (MemberId, i32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            passes: 0,
            converged: true,
        }
    }
}

/// Adjacency of one relation kind keyed in first-appearance order.
/// Symmetric kinds are recorded in both directions; duplicates are kept.
fn adjacency(tree: &FamilyTree, kind: RelationKind) -> IndexMap<MemberId, Vec<MemberId>> {
    let mut adjacency: IndexMap<MemberId, Vec<MemberId>> = IndexMap::new();
    for relation in tree.relations_of(kind) {
        adjacency
            .entry(relation.from())
            .or_default()
            .push(relation.to());
        if kind.is_symmetric() {
            adjacency
                .entry(relation.to())
                .or_default()
                .push(relation.from());
        }
    }
    adjacency
}

/// Pulls every adjacent pair onto a common generation. Returns `true` if
/// any value changed.
fn equalize(generations: &mut Generations, adjacency: &IndexMap<MemberId, Vec<MemberId>>) -> bool {
    let mut changed = false;

    for (&a, neighbours) in adjacency {
        for &b in neighbours {
            match (generations.get(a), generations.get(b)) {
                (Some(ga), None) => {
                    generations.set(b, ga);
                    changed = true;
                }
                (None, Some(gb)) => {
                    generations.set(a, gb);
                    changed = true;
                }
                (Some(ga), Some(gb)) if ga != gb => {
                    let deeper = ga.max(gb);
                    generations.set(a, deeper);
                    generations.set(b, deeper);
                    changed = true;
                }
                _ => {}
            }
        }
    }

    changed
}

/// Infers a generation for every member of `tree`, running at most
/// `max_passes` propagation passes.
///
/// Each pass applies, in order: child relations (`gen(child) >=
/// gen(parent) + 1`, never lowering a value), then spouse adjacency, then
/// sibling adjacency. Iteration stops early once a pass makes no change.
/// Members still unassigned afterwards get generation 0.
///
/// Inconsistent input (such as a cycle of child relations) does not
/// converge; the result after the last pass is returned as is.
///
/// # Examples
///
/// ```
/// # use lineage::layout::infer;
/// # use lineage::{identifier::MemberId, semantic::{FamilyTree, RelationKind}};
/// let mut tree = FamilyTree::default();
/// for (id, name) in [(1, "Grandfather"), (2, "Grandmother"), (3, "Father")] {
///     tree.add_member(MemberId::new(id), name, None);
/// }
/// tree.add_relation(MemberId::new(1), MemberId::new(2), RelationKind::Spouse);
/// tree.add_relation(MemberId::new(2), MemberId::new(3), RelationKind::Child);
///
/// let generations = infer(&tree, 8);
/// assert_eq!(generations.get(MemberId::new(1)), Some(0));
/// assert_eq!(generations.get(MemberId::new(3)), Some(1));
/// ```
pub fn infer(tree: &FamilyTree, max_passes: usize) -> Generations {
    let spouses = adjacency(tree, RelationKind::Spouse);
    let siblings = adjacency(tree, RelationKind::Sibling);

    let mut generations = Generations::default();
    let mut changed = true;

    while changed && generations.passes < max_passes {
        changed = false;
        generations.passes += 1;

        for relation in tree.relations_of(RelationKind::Child) {
            let parent = relation.from();
            let child = relation.to();

            let parent_generation = match generations.get(parent) {
                Some(generation) => generation,
                None => {
                    generations.set(parent, 0);
                    0
                }
            };
            let candidate = parent_generation + 1;

            if generations.get(child).is_none_or(|current| current < candidate) {
                generations.set(child, candidate);
                changed = true;
            }
        }

        changed |= equalize(&mut generations, &spouses);
        changed |= equalize(&mut generations, &siblings);

        trace!(pass = generations.passes, changed; "Generation pass finished");
    }

    generations.converged = !changed;
    if changed {
        debug!(
            passes = generations.passes;
            "Generation inference stopped before converging"
        );
    }

    for member in tree.members() {
        if generations.get(member.id()).is_none() {
            generations.set(member.id(), 0);
        }
    }

    debug!(
        members = tree.members_count(),
        passes = generations.passes,
        converged = generations.converged;
        "Generations inferred"
    );

    generations
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Parent/child edges that only point from lower to higher ids, so the
    /// child graph is acyclic.
    fn acyclic_tree_strategy() -> impl Strategy<Value = FamilyTree> {
        (1u64..12).prop_flat_map(|count| {
            prop::collection::vec((0..count, 0..count), 0..16).prop_map(move |edges| {
                let mut tree = FamilyTree::default();
                for value in 0..count {
                    tree.add_member(MemberId::new(value), "Member", None);
                }
                for (a, b) in edges {
                    if a < b {
                        tree.add_relation(MemberId::new(a), MemberId::new(b), RelationKind::Child);
                    }
                }
                tree
            })
        })
    }

    /// Child edges as above plus arbitrary spouse and sibling edges, which
    /// may pull a parent and its child together and prevent convergence.
    fn mixed_tree_strategy() -> impl Strategy<Value = FamilyTree> {
        let kind = prop::sample::select(vec![
            RelationKind::Child,
            RelationKind::Spouse,
            RelationKind::Sibling,
        ]);
        (1u64..10).prop_flat_map(move |count| {
            prop::collection::vec((0..count, 0..count, kind.clone()), 0..16).prop_map(
                move |edges| {
                    let mut tree = FamilyTree::default();
                    for value in 0..count {
                        tree.add_member(MemberId::new(value), "Member", None);
                    }
                    for (a, b, kind) in edges {
                        if kind != RelationKind::Child || a < b {
                            tree.add_relation(MemberId::new(a), MemberId::new(b), kind);
                        }
                    }
                    tree
                },
            )
        })
    }

    fn check_totality(tree: &FamilyTree, generations: &Generations) -> Result<(), TestCaseError> {
        for member in tree.members() {
            let generation = generations.get(member.id());
            prop_assert!(generation.is_some(), "member {} has no generation", member.id());
            prop_assert!(generation.unwrap_or(-1) >= 0);
        }
        Ok(())
    }

    fn check_child_monotonicity(
        tree: &FamilyTree,
        generations: &Generations,
    ) -> Result<(), TestCaseError> {
        for relation in tree.relations_of(RelationKind::Child) {
            let parent = generations.get(relation.from()).unwrap_or_default();
            let child = generations.get(relation.to()).unwrap_or_default();
            prop_assert!(
                child > parent,
                "child {} (gen {child}) not below parent {} (gen {parent})",
                relation.to(),
                relation.from()
            );
        }
        Ok(())
    }

    fn check_same_generation(
        tree: &FamilyTree,
        generations: &Generations,
    ) -> Result<(), TestCaseError> {
        for kind in [RelationKind::Spouse, RelationKind::Sibling] {
            for relation in tree.relations_of(kind) {
                prop_assert_eq!(
                    generations.get(relation.from()),
                    generations.get(relation.to()),
                    "{} {} and {} differ",
                    kind.as_str(),
                    relation.from(),
                    relation.to()
                );
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn converged_mixed_trees_satisfy_every_relation(tree in mixed_tree_strategy()) {
            let generations = infer(&tree, 32);
            check_totality(&tree, &generations)?;
            if generations.converged() {
                check_child_monotonicity(&tree, &generations)?;
                check_same_generation(&tree, &generations)?;
            }
        }

        #[test]
        fn converged_child_trees_are_monotonic(tree in acyclic_tree_strategy()) {
            // A chain of at most 12 members settles well within 16 passes
            let generations = infer(&tree, 16);
            check_totality(&tree, &generations)?;
            prop_assert!(generations.converged());
            check_child_monotonicity(&tree, &generations)?;
        }

        #[test]
        fn inference_is_deterministic(tree in acyclic_tree_strategy(), passes in 1usize..10) {
            prop_assert_eq!(infer(&tree, passes), infer(&tree, passes));
        }
    }
}

use std::collections::{HashMap, HashSet};

use crate::{
    foundation::core::PersonId,
    foundation::error::{FamtreeError, FamtreeResult},
    graph::person::Person,
};

/// Arena of people keyed by id.
///
/// Insertion order is preserved and is the iteration order. An id is stored at most once: the
/// first insert wins and later inserts of the same id hand back the existing entry.
#[derive(Clone, Debug, Default)]
pub struct PersonGraph {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl PersonGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `person` unless its id is already present. Returns the id either way.
    pub fn insert(&mut self, person: Person) -> PersonId {
        let id = person.id;
        if !self.index.contains_key(&id) {
            self.index.insert(id, self.people.len());
            self.people.push(person);
        }
        id
    }

    /// Person stored under `id`.
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.index.get(&id).map(|&slot| &self.people[slot])
    }

    /// `true` if `id` is stored.
    pub fn contains(&self, id: PersonId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of people stored.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// `true` when no one is stored.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// People in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Link `parent` as a parent of `child`. Both must already be in the graph.
    ///
    /// Returns `false` when the link already existed.
    pub fn add_parent(&mut self, child: PersonId, parent: PersonId) -> FamtreeResult<bool> {
        if !self.contains(parent) {
            return Err(FamtreeError::malformed(format!(
                "parent {parent} of person {child} is not in the graph"
            )));
        }
        let slot = *self.index.get(&child).ok_or_else(|| {
            FamtreeError::malformed(format!("person {child} is not in the graph"))
        })?;
        Ok(self.people[slot].push_parent(parent))
    }

    /// Ids reachable from `root` through parent links, in depth-first preorder.
    ///
    /// Each id appears once; unknown ids (including an unknown root) are skipped.
    pub fn reachable_from(&self, root: PersonId) -> Vec<PersonId> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(person) = self.get(id) else {
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            // Reverse so the first parent is visited first.
            stack.extend(person.parents().iter().rev().copied());
        }
        order
    }
}

/// A loaded family tree: a root person and everyone reachable from it.
#[derive(Clone, Debug)]
pub struct FamilyTree {
    root: PersonId,
    people: PersonGraph,
    last_id: i64,
}

impl FamilyTree {
    /// Build a tree from an arbitrary graph, keeping only people reachable from `root`.
    pub fn from_graph(root: PersonId, graph: &PersonGraph, last_id: i64) -> FamtreeResult<Self> {
        if !graph.contains(root) {
            return Err(FamtreeError::malformed(format!(
                "root person {root} is not in the graph"
            )));
        }

        let mut people = PersonGraph::new();
        for id in graph.reachable_from(root) {
            if let Some(person) = graph.get(id) {
                people.insert(person.clone());
            }
        }

        Ok(Self {
            root,
            people,
            last_id,
        })
    }

    /// Id of the root person.
    pub fn root_id(&self) -> PersonId {
        self.root
    }

    /// The root person.
    pub fn root(&self) -> &Person {
        // `from_graph` guarantees the root is stored.
        &self.people.people[self.people.index[&self.root]]
    }

    /// Person reachable from the root.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id)
    }

    /// Everyone connected to the root, root first.
    pub fn people(&self) -> &PersonGraph {
        &self.people
    }

    /// Number of people in the tree.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// `true` for a tree without people; never the case for a loaded tree.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// `lastId` counter carried over from the source data.
    pub fn last_id(&self) -> i64 {
        self.last_id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/tree.rs"]
mod tests;

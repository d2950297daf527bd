use std::collections::{BTreeMap, HashSet};

use crate::{
    foundation::core::PersonId,
    foundation::error::{FamtreeError, FamtreeResult},
    graph::tree::FamilyTree,
};

/// People grouped by generation level (root = 0), each level in first-visit order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GenerationMap {
    levels: BTreeMap<u32, Vec<PersonId>>,
}

impl GenerationMap {
    /// People at `level`, in visit order.
    pub fn get(&self, level: u32) -> Option<&[PersonId]> {
        self.levels.get(&level).map(Vec::as_slice)
    }

    /// Levels in ascending order.
    pub fn levels(&self) -> impl Iterator<Item = (u32, &[PersonId])> {
        self.levels.iter().map(|(&level, ids)| (level, ids.as_slice()))
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// `true` when no level is populated.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Deepest populated level.
    pub fn max_level(&self) -> Option<u32> {
        self.levels.keys().next_back().copied()
    }

    /// Level a person was assigned.
    pub fn level_of(&self, id: PersonId) -> Option<u32> {
        self.levels
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(&level, _)| level)
    }

    /// Total people across all levels.
    pub fn person_count(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    fn push(&mut self, level: u32, id: PersonId) {
        self.levels.entry(level).or_default().push(id);
    }
}

impl FromIterator<(u32, Vec<PersonId>)> for GenerationMap {
    fn from_iter<I: IntoIterator<Item = (u32, Vec<PersonId>)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().collect(),
        }
    }
}

/// Stateless generation assignment over a loaded tree.
///
/// Policy: first write wins. A person keeps the level of its first visit in a depth-first walk
/// (root, then parents in stored order) and is never moved or re-descended on later visits, even
/// when a later path would give a different level. Reaching a person that is still on the current
/// downward path is a [`FamtreeError::CyclicAncestry`].
pub struct GenerationAssigner;

struct Frame {
    id: PersonId,
    level: u32,
    next_parent: usize,
}

impl GenerationAssigner {
    /// Assign every person reachable from the root to a generation level.
    #[tracing::instrument(skip(tree), fields(root = %tree.root_id(), people = tree.len()))]
    pub fn assign(tree: &FamilyTree) -> FamtreeResult<GenerationMap> {
        let root = tree.root_id();
        let mut map = GenerationMap::default();
        let mut assigned = HashSet::from([root]);
        let mut on_path = HashSet::from([root]);
        let mut stack = vec![Frame {
            id: root,
            level: 0,
            next_parent: 0,
        }];
        map.push(0, root);

        while let Some(frame) = stack.last_mut() {
            let parents = tree.person(frame.id).map(|p| p.parents()).unwrap_or(&[]);
            let Some(&parent) = parents.get(frame.next_parent) else {
                on_path.remove(&frame.id);
                stack.pop();
                continue;
            };
            frame.next_parent += 1;
            let level = frame.level + 1;

            if on_path.contains(&parent) {
                return Err(FamtreeError::CyclicAncestry(parent));
            }
            if !assigned.insert(parent) {
                tracing::trace!(%parent, level, "already placed, keeping first level");
                continue;
            }

            map.push(level, parent);
            on_path.insert(parent);
            stack.push(Frame {
                id: parent,
                level,
                next_parent: 0,
            });
        }

        tracing::debug!(levels = map.len(), "assigned generations");
        Ok(map)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generation/assigner.rs"]
mod tests;

use crate::{generation::assigner::GenerationMap, graph::tree::FamilyTree};

/// Structural summary of a tree, as printed by `famtree analyze`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TreeStats {
    /// Number of people in the tree.
    pub total_people: usize,
    /// Number of distinct generation levels.
    pub total_generations: usize,
    /// People carrying a photo reference.
    pub people_with_photos: usize,
    /// People with a known birth year.
    pub people_with_birth_years: usize,
    /// Largest parent count of any single person.
    pub max_parents: usize,
    /// `(level, people)` in ascending level order.
    pub per_generation: Vec<(u32, usize)>,
}

impl TreeStats {
    /// Gather statistics for a tree and its generation map.
    pub fn collect(tree: &FamilyTree, generations: &GenerationMap) -> Self {
        let people = tree.people();
        Self {
            total_people: people.len(),
            total_generations: generations.len(),
            people_with_photos: people.iter().filter(|p| p.photo.is_some()).count(),
            people_with_birth_years: people.iter().filter(|p| p.birth_year.is_some()).count(),
            max_parents: people.iter().map(|p| p.parents().len()).max().unwrap_or(0),
            per_generation: generations
                .levels()
                .map(|(level, ids)| (level, ids.len()))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagnostics/stats.rs"]
mod tests;

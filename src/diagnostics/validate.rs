use std::collections::BTreeMap;

use crate::{foundation::core::PersonId, graph::tree::FamilyTree};

/// Advisory issue found in a tree. Never fatal; callers decide whether to proceed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// People whose name is empty or whitespace.
    UnnamedPeople {
        /// How many.
        count: usize,
    },
    /// Ids stored more than once.
    DuplicateIds {
        /// Each repeated id once, ascending.
        ids: Vec<PersonId>,
    },
    /// A person listed among their own parents.
    ///
    /// Only graphs assembled through [`PersonGraph`](crate::PersonGraph) can carry this: the
    /// loader rejects a record nested under itself as [`FamtreeError::CyclicAncestry`].
    ///
    /// [`FamtreeError::CyclicAncestry`]: crate::FamtreeError::CyclicAncestry
    SelfParent {
        /// The person.
        id: PersonId,
        /// Their name.
        name: String,
    },
    /// An id re-declared in the input with fields that differ from its first declaration.
    ConflictingRecord {
        /// The re-declared id.
        id: PersonId,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnnamedPeople { count } => write!(f, "found {count} people without names"),
            Self::DuplicateIds { ids } => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "duplicate ids found: {}", ids.join(", "))
            }
            Self::SelfParent { id, name } => {
                write!(f, "person {name:?} ({id}) is their own parent")
            }
            Self::ConflictingRecord { id } => write!(
                f,
                "person {id} is declared more than once with different fields; the first declaration wins"
            ),
        }
    }
}

/// Check a tree for unnamed people, duplicate ids and self-parentage.
pub fn validate(tree: &FamilyTree) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let unnamed = tree
        .people()
        .iter()
        .filter(|p| p.name.trim().is_empty())
        .count();
    if unnamed > 0 {
        out.push(Diagnostic::UnnamedPeople { count: unnamed });
    }

    let mut seen = BTreeMap::<PersonId, usize>::new();
    for person in tree.people().iter() {
        *seen.entry(person.id).or_default() += 1;
    }
    let duplicates: Vec<PersonId> = seen
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(id, _)| id)
        .collect();
    if !duplicates.is_empty() {
        out.push(Diagnostic::DuplicateIds { ids: duplicates });
    }

    for person in tree.people().iter() {
        if person.parents().contains(&person.id) {
            out.push(Diagnostic::SelfParent {
                id: person.id,
                name: person.name.clone(),
            });
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/diagnostics/validate.rs"]
mod tests;

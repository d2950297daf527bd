use std::{collections::HashSet, path::Path};

use anyhow::Context as _;

use crate::{
    diagnostics::validate::{Diagnostic, validate},
    foundation::core::PersonId,
    foundation::error::{FamtreeError, FamtreeResult},
    graph::person::{Person, PersonKind},
    graph::tree::{FamilyTree, PersonGraph},
    loader::record::PersonRecord,
};

/// A loaded tree plus the advisory issues found while loading it.
#[derive(Clone, Debug)]
pub struct LoadedTree {
    /// The loaded tree.
    pub tree: FamilyTree,
    /// Advisory issues, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

/// Stateless loader from nested records to a [`FamilyTree`].
pub struct TreeLoader;

impl TreeLoader {
    /// Load a tree, discarding diagnostics.
    #[tracing::instrument(skip(record), fields(root = ?record.id))]
    pub fn load(record: &PersonRecord) -> FamtreeResult<FamilyTree> {
        Ok(Self::load_with_diagnostics(record)?.tree)
    }

    /// Load a tree and collect validation diagnostics alongside it.
    pub fn load_with_diagnostics(record: &PersonRecord) -> FamtreeResult<LoadedTree> {
        let mut cache = ParseCache::default();
        let root = cache.parse(record, "root")?;

        // The public table comes from reachability, not from the parse cache.
        let tree = FamilyTree::from_graph(root, &cache.graph, record.last_id.unwrap_or(0))?;

        let mut diagnostics: Vec<Diagnostic> = cache
            .conflicts
            .into_iter()
            .map(|id| Diagnostic::ConflictingRecord { id })
            .collect();
        diagnostics.extend(validate(&tree));

        tracing::debug!(
            people = tree.len(),
            diagnostics = diagnostics.len(),
            "loaded family tree"
        );
        Ok(LoadedTree { tree, diagnostics })
    }

    /// Decode a JSON document and load it.
    pub fn load_json(json: &str) -> FamtreeResult<FamilyTree> {
        Self::load(&parse_record_json(json)?)
    }

    /// Read a JSON file and load it with diagnostics.
    pub fn load_path(path: &Path) -> FamtreeResult<LoadedTree> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read family tree '{}'", path.display()))?;
        Self::load_with_diagnostics(&parse_record_json(&json)?)
    }
}

/// Decode the nested record format without building a tree.
///
/// Nesting depth is unbounded: every generation adds two levels of JSON, so serde_json's default
/// limit is lifted and the deserializer grows its stack on demand instead.
pub fn parse_record_json(json: &str) -> FamtreeResult<PersonRecord> {
    let undecodable = |e: serde_json::Error| {
        FamtreeError::malformed(format!("parse family tree JSON: {e}"))
    };
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let record = <PersonRecord as serde::Deserialize>::deserialize(
        serde_stacker::Deserializer::new(&mut de),
    )
    .map_err(undecodable)?;
    de.end().map_err(undecodable)?;
    Ok(record)
}

/// Construction cache keyed by id.
///
/// Invariant: a person is inserted into `graph` before any of its embedded parents are parsed.
/// `active` holds the ids on the current downward path.
#[derive(Default)]
struct ParseCache {
    graph: PersonGraph,
    active: HashSet<PersonId>,
    conflicts: Vec<PersonId>,
}

/// Outcome of meeting one record during the walk.
enum Visit {
    /// First sight of the id; its parents still have to be walked.
    New(PersonId),
    /// Already in the cache; embedded parents are ignored.
    Cached(PersonId),
}

/// A record whose parents are being walked.
struct Frame<'a> {
    record: &'a PersonRecord,
    id: PersonId,
    at: String,
    next: usize,
}

impl ParseCache {
    /// Walk `root` and its embedded parents depth-first with an explicit stack.
    ///
    /// Parent links are added once the parent's own subtree is finished, so stored parent order
    /// follows input order.
    fn parse(&mut self, root: &PersonRecord, at: &str) -> FamtreeResult<PersonId> {
        let root_id = match self.visit(root, at)? {
            Visit::Cached(id) => return Ok(id),
            Visit::New(id) => id,
        };

        let mut stack = vec![Frame {
            record: root,
            id: root_id,
            at: at.to_string(),
            next: 0,
        }];
        while let Some(top) = stack.last_mut() {
            let record = top.record;
            let Some(parent) = record.parents.get(top.next) else {
                let done = top.id;
                stack.pop();
                self.active.remove(&done);
                if let Some(child) = stack.last() {
                    self.graph.add_parent(child.id, done)?;
                }
                continue;
            };

            let child = top.id;
            let parent_at = format!("{}.parents[{}]", top.at, top.next);
            top.next += 1;
            match self.visit(parent, &parent_at)? {
                Visit::Cached(parent_id) => {
                    self.graph.add_parent(child, parent_id)?;
                }
                Visit::New(parent_id) => stack.push(Frame {
                    record: parent,
                    id: parent_id,
                    at: parent_at,
                    next: 0,
                }),
            }
        }
        Ok(root_id)
    }

    fn visit(&mut self, record: &PersonRecord, at: &str) -> FamtreeResult<Visit> {
        let id = record.id.map(PersonId).ok_or_else(|| {
            FamtreeError::malformed(format!("record at {at} is missing required `id`"))
        })?;

        if self.graph.contains(id) {
            if self.active.contains(&id) {
                return Err(FamtreeError::CyclicAncestry(id));
            }
            tracing::debug!(%id, "reusing cached person");
            self.note_conflict(id, record);
            return Ok(Visit::Cached(id));
        }

        self.begin(id, record);
        Ok(Visit::New(id))
    }

    fn begin(&mut self, id: PersonId, record: &PersonRecord) {
        if let Some(tag) = record.kind.as_deref()
            && PersonKind::from_tag(tag).is_none()
        {
            tracing::warn!(%id, tag, "unknown person type, using 'person'");
        }

        let mut person = Person::new(id, record.name_or_empty())
            .with_kind(record.kind())
            .with_stock(record.stock.unwrap_or(false));
        person.birth_year = record.birth_year.clone();
        person.photo = record.photo.clone();

        self.graph.insert(person);
        self.active.insert(id);
    }

    fn note_conflict(&mut self, id: PersonId, record: &PersonRecord) {
        let Some(cached) = self.graph.get(id) else {
            return;
        };
        let parents: Vec<Option<PersonId>> =
            record.parents.iter().map(|p| p.id.map(PersonId)).collect();
        let same = cached.name == record.name_or_empty()
            && cached.birth_year == record.birth_year
            && cached.photo == record.photo
            && cached.kind == record.kind()
            && cached.stock == record.stock.unwrap_or(false)
            && parents
                .iter()
                .copied()
                .eq(cached.parents().iter().copied().map(Some));

        if !same && !self.conflicts.contains(&id) {
            tracing::warn!(%id, "person re-declared with different fields, keeping the first");
            self.conflicts.push(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/parse.rs"]
mod tests;

use crate::{
    foundation::core::{PersonId, Rect},
    graph::person::{Person, PersonKind},
    graph::tree::FamilyTree,
    layout::engine::LayoutPlan,
};

/// Renderer-facing style class of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    /// The person the tree is drawn for.
    Root,
    /// A direct parent of the root.
    Parent,
    /// Anyone else.
    Person,
}

impl From<PersonKind> for StyleTag {
    fn from(kind: PersonKind) -> Self {
        match kind {
            PersonKind::Root => Self::Root,
            PersonKind::Parent => Self::Parent,
            PersonKind::Person => Self::Person,
        }
    }
}

/// One person as the renderer sees it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanNode {
    /// Person this node draws.
    pub id: PersonId,
    /// Label lines, top to bottom.
    pub lines: Vec<String>,
    /// Horizontal position in layout units.
    pub x: f64,
    /// Vertical position in layout units.
    pub y: f64,
    /// Style selector.
    pub style_tag: StyleTag,
    /// Photo reference, passed through from the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Draw a placeholder portrait.
    #[serde(default)]
    pub stock: bool,
}

/// A parent → child link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEdge {
    /// Parent end.
    pub from_id: PersonId,
    /// Child end.
    pub to_id: PersonId,
}

/// Backend-agnostic description of what to draw: positioned, labeled nodes and the edges between
/// them. This is the only thing renderers consume.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawingPlan {
    /// Nodes in tree order.
    pub nodes: Vec<PlanNode>,
    /// Parent-to-child edges.
    pub edges: Vec<PlanEdge>,
    /// Bounds of the node positions in layout units.
    pub bounds: Rect,
}

impl DrawingPlan {
    /// Node for a person.
    pub fn node(&self, id: PersonId) -> Option<&PlanNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Turns a tree and its layout into a [`DrawingPlan`].
pub struct DrawingPlanBuilder;

impl DrawingPlanBuilder {
    /// Build the plan; people or edges without a layout position are skipped.
    #[tracing::instrument(skip(tree, layout), fields(people = tree.len()))]
    pub fn build(tree: &FamilyTree, layout: &LayoutPlan) -> DrawingPlan {
        let mut nodes = Vec::with_capacity(tree.len());
        for person in tree.people().iter() {
            let Some(pos) = layout.position(person.id) else {
                tracing::debug!(id = %person.id, "person has no layout position, skipping node");
                continue;
            };
            nodes.push(PlanNode {
                id: person.id,
                lines: label_lines(person),
                x: pos.x,
                y: pos.y,
                style_tag: person.kind.into(),
                photo: person.photo.clone(),
                stock: person.stock,
            });
        }

        let mut edges = Vec::new();
        for child in tree.people().iter() {
            for &parent in child.parents() {
                if layout.position(parent).is_none() || layout.position(child.id).is_none() {
                    tracing::debug!(%parent, child = %child.id, "edge endpoint not laid out, skipping");
                    continue;
                }
                edges.push(PlanEdge {
                    from_id: parent,
                    to_id: child.id,
                });
            }
        }

        DrawingPlan {
            nodes,
            edges,
            bounds: layout.bounds(),
        }
    }
}

/// Display lines for a person: the name (split before the last token when it has more than two
/// tokens) and `(birth year)` when known.
pub fn label_lines(person: &Person) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    let tokens: Vec<&str> = person.name.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, rest)) if tokens.len() > 2 => {
            lines.push(rest.join(" "));
            lines.push((*last).to_string());
        }
        _ => lines.push(person.name.clone()),
    }
    if let Some(year) = &person.birth_year {
        lines.push(format!("({year})"));
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/plan/builder.rs"]
mod tests;

use super::*;
use crate::{
    generation::assigner::GenerationAssigner,
    layout::engine::{LayoutEngine, LayoutPlan},
    loader::parse::TreeLoader,
};

fn person(name: &str, year: Option<&str>) -> Person {
    let p = Person::new(PersonId(1), name);
    match year {
        Some(y) => p.with_birth_year(y),
        None => p,
    }
}

fn ada() -> FamilyTree {
    TreeLoader::load_json(
        r#"{ "id": 1, "name": "Ada Lovelace", "birthyear": "1815", "type": "root",
             "parents": [ { "id": 2, "name": "Byron" }, { "id": 3, "name": "Anne Isabella Milbanke" } ] }"#,
    )
    .unwrap()
}

fn layout_of(tree: &FamilyTree) -> LayoutPlan {
    LayoutEngine::default().layout(&GenerationAssigner::assign(tree).unwrap())
}

#[test]
fn long_names_split_before_the_last_token() {
    assert_eq!(
        label_lines(&person("Anne Isabella Milbanke", None)),
        vec!["Anne Isabella", "Milbanke"]
    );
    assert_eq!(
        label_lines(&person("Ada Lovelace", Some("1815"))),
        vec!["Ada Lovelace", "(1815)"]
    );
    assert_eq!(label_lines(&person("Byron", None)), vec!["Byron"]);
    assert_eq!(
        label_lines(&person("Juan  de la Cruz", Some("c. 1542"))),
        vec!["Juan de la", "Cruz", "(c. 1542)"]
    );
}

#[test]
fn empty_name_still_gets_a_line() {
    assert_eq!(label_lines(&person("", None)), vec![""]);
}

#[test]
fn builds_nodes_and_parent_to_child_edges() {
    let tree = ada();
    let plan = DrawingPlanBuilder::build(&tree, &layout_of(&tree));

    assert_eq!(plan.nodes.len(), 3);
    assert_eq!(
        plan.edges,
        vec![
            PlanEdge { from_id: PersonId(2), to_id: PersonId(1) },
            PlanEdge { from_id: PersonId(3), to_id: PersonId(1) },
        ]
    );

    let root = plan.node(PersonId(1)).unwrap();
    assert_eq!(root.style_tag, StyleTag::Root);
    assert_eq!((root.x, root.y), (0.0, 0.0));
    assert_eq!(root.lines, vec!["Ada Lovelace", "(1815)"]);

    let anne = plan.node(PersonId(3)).unwrap();
    assert_eq!(anne.style_tag, StyleTag::Person);
    assert_eq!(anne.lines, vec!["Anne Isabella", "Milbanke"]);
    assert!(plan.node(PersonId(2)).unwrap().x < anne.x);
}

#[test]
fn people_without_positions_are_skipped() {
    let tree = ada();
    let plan = DrawingPlanBuilder::build(&tree, &LayoutPlan::default());
    assert!(plan.nodes.is_empty());
    assert!(plan.edges.is_empty());
}

#[test]
fn serializes_with_camel_case_fields() {
    let tree = ada();
    let plan = DrawingPlanBuilder::build(&tree, &layout_of(&tree));
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["edges"][0]["fromId"], 2);
    assert_eq!(json["edges"][0]["toId"], 1);
    assert_eq!(json["nodes"][0]["styleTag"], "root");
    assert!(json["nodes"][0].get("photo").is_none());
}

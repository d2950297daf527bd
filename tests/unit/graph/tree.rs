use super::*;
use crate::graph::person::PersonKind;

fn id(n: i64) -> PersonId {
    PersonId(n)
}

fn diamond() -> PersonGraph {
    // 1 -> {2, 3}, 2 -> {4}, 3 -> {4}
    let mut g = PersonGraph::new();
    for n in 1..=4 {
        g.insert(Person::new(id(n), format!("p{n}")));
    }
    g.add_parent(id(1), id(2)).unwrap();
    g.add_parent(id(1), id(3)).unwrap();
    g.add_parent(id(2), id(4)).unwrap();
    g.add_parent(id(3), id(4)).unwrap();
    g
}

#[test]
fn insert_keeps_first_person_for_an_id() {
    let mut g = PersonGraph::new();
    g.insert(Person::new(id(1), "first"));
    let again = g.insert(Person::new(id(1), "second").with_kind(PersonKind::Root));
    assert_eq!(again, id(1));
    assert_eq!(g.len(), 1);
    assert_eq!(g.get(id(1)).unwrap().name, "first");
    assert_eq!(g.get(id(1)).unwrap().kind, PersonKind::Person);
}

#[test]
fn add_parent_deduplicates_and_rejects_unknown_ids() {
    let mut g = diamond();
    assert!(!g.add_parent(id(1), id(2)).unwrap());
    assert_eq!(g.get(id(1)).unwrap().parents(), &[id(2), id(3)]);

    assert!(g.add_parent(id(1), id(99)).is_err());
    assert!(g.add_parent(id(99), id(1)).is_err());
}

#[test]
fn reachable_from_is_preorder_and_visits_shared_ancestor_once() {
    let g = diamond();
    assert_eq!(g.reachable_from(id(1)), vec![id(1), id(2), id(4), id(3)]);
    assert_eq!(g.reachable_from(id(3)), vec![id(3), id(4)]);
    assert!(g.reachable_from(id(42)).is_empty());
}

#[test]
fn reachable_from_terminates_on_cycles() {
    let mut g = diamond();
    g.add_parent(id(4), id(1)).unwrap();
    assert_eq!(g.reachable_from(id(1)).len(), 4);
}

#[test]
fn tree_keeps_only_people_connected_to_root() {
    let mut g = diamond();
    g.insert(Person::new(id(7), "stranger"));

    let tree = FamilyTree::from_graph(id(2), &g, 12).unwrap();
    assert_eq!(tree.root_id(), id(2));
    assert_eq!(tree.root().name, "p2");
    assert_eq!(tree.len(), 2);
    assert!(tree.person(id(7)).is_none());
    assert!(tree.person(id(1)).is_none());
    assert_eq!(tree.last_id(), 12);
    assert_eq!(tree.people().len(), g.reachable_from(id(2)).len());
}

#[test]
fn tree_rejects_unknown_root() {
    let g = diamond();
    assert!(matches!(
        FamilyTree::from_graph(id(9), &g, 0),
        Err(FamtreeError::MalformedData(_))
    ));
}

#[test]
fn person_display_includes_birth_year() {
    let p = Person::new(id(1), "Ada Lovelace").with_birth_year("1815");
    assert_eq!(p.to_string(), "Ada Lovelace (1815)");
    assert_eq!(Person::new(id(2), "Byron").to_string(), "Byron");
}

#[test]
fn kind_tags_are_case_insensitive_and_closed() {
    assert_eq!(PersonKind::from_tag("Root"), Some(PersonKind::Root));
    assert_eq!(PersonKind::from_tag(" parent "), Some(PersonKind::Parent));
    assert_eq!(PersonKind::from_tag("person"), Some(PersonKind::Person));
    assert_eq!(PersonKind::from_tag("grandparent"), None);
    assert_eq!(PersonKind::Parent.as_str(), "parent");
}

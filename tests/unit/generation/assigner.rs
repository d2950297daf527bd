use super::*;
use crate::graph::{person::Person, tree::PersonGraph};

fn id(n: i64) -> PersonId {
    PersonId(n)
}

fn tree_of(links: &[(i64, i64)], people: std::ops::RangeInclusive<i64>) -> FamilyTree {
    let mut g = PersonGraph::new();
    for n in people {
        g.insert(Person::new(id(n), format!("p{n}")));
    }
    for &(child, parent) in links {
        g.add_parent(id(child), id(parent)).unwrap();
    }
    FamilyTree::from_graph(id(1), &g, 0).unwrap()
}

#[test]
fn root_with_two_parents() {
    let map = GenerationAssigner::assign(&tree_of(&[(1, 2), (1, 3)], 1..=3)).unwrap();
    assert_eq!(map.get(0), Some(&[id(1)][..]));
    assert_eq!(map.get(1), Some(&[id(2), id(3)][..]));
    assert_eq!(map.len(), 2);
    assert_eq!(map.max_level(), Some(1));
}

#[test]
fn shared_ancestor_is_placed_once() {
    let map =
        GenerationAssigner::assign(&tree_of(&[(1, 2), (1, 3), (2, 4), (3, 4)], 1..=4)).unwrap();
    assert_eq!(map.get(2), Some(&[id(4)][..]));
    assert_eq!(map.person_count(), 4);
}

#[test]
fn first_visit_wins_over_a_shorter_later_path() {
    // 3 is reached at depth 2 through 2 before the direct link from 1 is walked.
    let map = GenerationAssigner::assign(&tree_of(&[(1, 2), (2, 3), (1, 3)], 1..=3)).unwrap();
    assert_eq!(map.level_of(id(3)), Some(2));
    assert_eq!(map.get(1), Some(&[id(2)][..]));
}

#[test]
fn every_person_gets_exactly_one_level() {
    let tree = tree_of(
        &[(1, 2), (1, 3), (2, 4), (2, 5), (3, 5), (3, 6), (5, 7), (6, 7)],
        1..=7,
    );
    let map = GenerationAssigner::assign(&tree).unwrap();
    assert_eq!(map.person_count(), tree.len());
    for person in tree.people().iter() {
        let hits = map.levels().filter(|(_, ids)| ids.contains(&person.id)).count();
        assert_eq!(hits, 1, "person {}", person.id);
    }
}

#[test]
fn assignment_is_repeatable() {
    let tree = tree_of(&[(1, 2), (1, 3), (2, 4), (3, 4)], 1..=4);
    assert_eq!(
        GenerationAssigner::assign(&tree).unwrap(),
        GenerationAssigner::assign(&tree).unwrap()
    );
}

#[test]
fn lone_root_is_level_zero() {
    let map = GenerationAssigner::assign(&tree_of(&[], 1..=1)).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(0), Some(&[id(1)][..]));
}

#[test]
fn cycles_are_reported() {
    let err = GenerationAssigner::assign(&tree_of(&[(1, 2), (2, 1)], 1..=2)).unwrap_err();
    assert!(matches!(err, FamtreeError::CyclicAncestry(p) if p == id(1)));

    let err = GenerationAssigner::assign(&tree_of(&[(1, 1)], 1..=1)).unwrap_err();
    assert!(matches!(err, FamtreeError::CyclicAncestry(p) if p == id(1)));
}

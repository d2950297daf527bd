use super::*;
use crate::{generation::assigner::GenerationAssigner, loader::parse::TreeLoader};

#[test]
fn summarizes_a_small_tree() {
    let tree = TreeLoader::load_json(
        r#"{ "id": 1, "name": "Child", "birthyear": "1990", "photo": "data:image/png;base64,AA==",
             "parents": [
                { "id": 2, "name": "Mother", "birthyear": 1960,
                  "parents": [ { "id": 4, "name": "Grandma" } ] },
                { "id": 3, "name": "Father" }
             ] }"#,
    )
    .unwrap();
    let generations = GenerationAssigner::assign(&tree).unwrap();
    let stats = TreeStats::collect(&tree, &generations);

    assert_eq!(
        stats,
        TreeStats {
            total_people: 4,
            total_generations: 3,
            people_with_photos: 1,
            people_with_birth_years: 2,
            max_parents: 2,
            per_generation: vec![(0, 1), (1, 2), (2, 1)],
        }
    );
}

#[test]
fn lone_person() {
    let tree = TreeLoader::load_json(r#"{ "id": 7, "name": "Solo" }"#).unwrap();
    let stats = TreeStats::collect(&tree, &GenerationAssigner::assign(&tree).unwrap());
    assert_eq!(stats.total_people, 1);
    assert_eq!(stats.max_parents, 0);
    assert_eq!(stats.per_generation, vec![(0, 1)]);
}

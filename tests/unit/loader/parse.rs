use super::*;

fn ada_json() -> &'static str {
    r#"{
        "id": 1, "name": "Ada Lovelace", "birthyear": "1815", "type": "root", "lastId": 3,
        "parents": [
            { "id": 2, "name": "Byron", "parents": [] },
            { "id": 3, "name": "Anne Isabella Milbanke", "parents": [] }
        ]
    }"#
}

#[test]
fn loads_nested_records_with_defaults() {
    let tree = TreeLoader::load_json(ada_json()).unwrap();
    assert_eq!(tree.root_id(), PersonId(1));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.last_id(), 3);

    let root = tree.root();
    assert_eq!(root.kind, PersonKind::Root);
    assert_eq!(root.birth_year.as_deref(), Some("1815"));
    assert_eq!(root.parents(), &[PersonId(2), PersonId(3)]);

    let byron = tree.person(PersonId(2)).unwrap();
    assert_eq!(byron.kind, PersonKind::Person);
    assert_eq!(byron.birth_year, None);
    assert_eq!(byron.photo, None);
    assert!(!byron.stock);
}

#[test]
fn missing_root_id_is_malformed() {
    let err = TreeLoader::load_json(r#"{ "name": "Nobody" }"#).unwrap_err();
    assert!(matches!(err, FamtreeError::MalformedData(_)));
}

#[test]
fn missing_nested_id_names_its_position() {
    let err = TreeLoader::load_json(
        r#"{ "id": 1, "name": "a", "parents": [ { "id": 2 }, { "name": "x" } ] }"#,
    )
    .unwrap_err();
    let FamtreeError::MalformedData(msg) = err else {
        panic!("expected malformed data, got {err:?}");
    };
    assert!(msg.contains("root.parents[1]"), "{msg}");
}

#[test]
fn invalid_json_is_malformed_data() {
    assert!(matches!(
        TreeLoader::load_json("{ not json"),
        Err(FamtreeError::MalformedData(_))
    ));
    assert!(matches!(
        TreeLoader::load_json(r#"{ "id": 1 } trailing"#),
        Err(FamtreeError::MalformedData(_))
    ));
    assert!(matches!(
        TreeLoader::load_json(r#"{ "id": 1, "birthyear": [1815] }"#),
        Err(FamtreeError::MalformedData(_))
    ));
}

fn chain_json(generations: usize) -> String {
    let mut json = String::new();
    for id in 0..=generations {
        json.push_str(&format!(r#"{{"id":{id},"name":"p{id}","parents":["#));
    }
    for _ in 0..=generations {
        json.push_str("]}");
    }
    json
}

#[test]
fn deep_ancestor_chains_load() {
    let tree = TreeLoader::load_json(&chain_json(200)).unwrap();
    assert_eq!(tree.len(), 201);
    assert_eq!(tree.person(PersonId(199)).unwrap().parents(), &[PersonId(200)]);

    let generations = crate::generation::assigner::GenerationAssigner::assign(&tree).unwrap();
    assert_eq!(generations.max_level(), Some(200));
    assert_eq!(generations.level_of(PersonId(200)), Some(200));
}

#[test]
fn deep_chains_keep_cycle_detection() {
    let json = chain_json(150).replacen(r#"{"id":150,"#, r#"{"id":3,"#, 1);
    assert!(matches!(
        TreeLoader::load_json(&json),
        Err(FamtreeError::CyclicAncestry(PersonId(3)))
    ));
}

#[test]
fn shared_ancestor_is_one_entry_referenced_by_both_children() {
    let grandma = PersonRecord::new(4, "Grandma");
    let root = PersonRecord::new(1, "Child").with_parents(vec![
        PersonRecord::new(2, "Mother").with_parents(vec![grandma.clone()]),
        PersonRecord::new(3, "Father").with_parents(vec![grandma]),
    ]);

    let tree = TreeLoader::load(&root).unwrap();
    assert_eq!(tree.len(), 4);

    let via_mother = tree.person(PersonId(2)).unwrap().parents()[0];
    let via_father = tree.person(PersonId(3)).unwrap().parents()[0];
    assert_eq!(via_mother, via_father);
    assert!(std::ptr::eq(
        tree.person(via_mother).unwrap(),
        tree.person(via_father).unwrap()
    ));
    assert_eq!(tree.people().iter().filter(|p| p.id == PersonId(4)).count(), 1);
}

#[test]
fn repeated_record_is_not_reparsed() {
    // The second copy of id 2 carries an extra parent that only exists there; the cached entry
    // wins and its embedded parents are never visited.
    let first = PersonRecord::new(2, "Shared");
    let second = PersonRecord::new(2, "Shared").with_parents(vec![PersonRecord::new(9, "Ghost")]);
    let root = PersonRecord::new(1, "Root").with_parents(vec![
        PersonRecord::new(5, "A").with_parents(vec![first]),
        PersonRecord::new(6, "B").with_parents(vec![second]),
    ]);

    let loaded = TreeLoader::load_with_diagnostics(&root).unwrap();
    assert!(loaded.tree.person(PersonId(9)).is_none());
    assert!(loaded.tree.person(PersonId(2)).unwrap().parents().is_empty());
    assert_eq!(
        loaded.diagnostics,
        vec![Diagnostic::ConflictingRecord { id: PersonId(2) }]
    );
}

#[test]
fn verbatim_repeats_produce_no_conflict() {
    let shared = PersonRecord::new(2, "Shared").with_birth_year("1900");
    let root = PersonRecord::new(1, "Root").with_parents(vec![
        PersonRecord::new(5, "A").with_parents(vec![shared.clone()]),
        PersonRecord::new(6, "B").with_parents(vec![shared]),
    ]);
    let loaded = TreeLoader::load_with_diagnostics(&root).unwrap();
    assert_eq!(loaded.tree.len(), 4);
    assert!(loaded.diagnostics.is_empty());
}

#[test]
fn record_nested_under_its_own_ancestry_is_cyclic() {
    // Terminates only because id 1 is cached before its parents are parsed.
    let root = PersonRecord::new(1, "Loop").with_parents(vec![
        PersonRecord::new(2, "Parent").with_parents(vec![PersonRecord::new(1, "Loop")]),
    ]);
    assert!(matches!(
        TreeLoader::load(&root),
        Err(FamtreeError::CyclicAncestry(PersonId(1)))
    ));
}

#[test]
fn cache_is_populated_before_parents_are_parsed() {
    let mut cache = ParseCache::default();
    let record =
        PersonRecord::new(7, "Seven").with_parents(vec![PersonRecord::new(8, "Eight")]);
    cache.begin(PersonId(7), &record);

    assert!(cache.graph.contains(PersonId(7)));
    assert!(cache.active.contains(&PersonId(7)));
    assert!(cache.graph.get(PersonId(7)).unwrap().parents().is_empty());
    assert!(!cache.graph.contains(PersonId(8)));
}

#[test]
fn unknown_type_and_numeric_birth_year_are_tolerated() {
    let tree = TreeLoader::load_json(
        r#"{ "id": 1, "name": "X", "type": "ancestor", "birthyear": 1901, "stock": true }"#,
    )
    .unwrap();
    let root = tree.root();
    assert_eq!(root.kind, PersonKind::Person);
    assert_eq!(root.birth_year.as_deref(), Some("1901"));
    assert!(root.stock);
}

#[test]
fn people_table_matches_reachability() {
    let tree = TreeLoader::load_json(ada_json()).unwrap();
    let reachable = tree.people().reachable_from(tree.root_id());
    assert_eq!(tree.len(), reachable.len());
    let order: Vec<PersonId> = tree.people().iter().map(|p| p.id).collect();
    assert_eq!(order, reachable);
}

#[test]
fn load_path_reports_missing_files() {
    let err = TreeLoader::load_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("read family tree"));
}

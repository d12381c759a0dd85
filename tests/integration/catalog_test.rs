//! Catalog loading integration tests.

use super::common::Workspace;
use serde_json::json;
use sql_grader::error::GraderError;

#[test]
fn test_list_skips_corrupt_definition() {
    let ws = Workspace::new();
    ws.add_exercise("01-create-table", json!({"id": "01-create-table", "name": "Create"}));
    ws.add_exercise("02-insert", json!({"id": "02-insert", "name": "Insert"}));
    let broken = ws.root().join("exercises").join("03-broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("config.json"), "{\"id\": ").unwrap();

    let grader = ws.grader();
    let ids: Vec<String> = grader
        .catalog()
        .load_exercises()
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec!["01-create-table", "02-insert"]);

    let err = grader.catalog().load_exercise("03-broken").unwrap_err();
    assert!(matches!(err, GraderError::Parse(_)));
}

#[test]
fn test_each_call_rereads_disk() {
    let ws = Workspace::new();
    let grader = ws.grader();
    assert!(grader.catalog().load_exercises().unwrap().is_empty());

    ws.add_exercise("01-create-table", json!({"id": "01-create-table"}));
    assert_eq!(grader.catalog().load_exercises().unwrap().len(), 1);
}

#[test]
fn test_checks_keep_declaration_order() {
    let ws = Workspace::new();
    ws.add_exercise(
        "01-create-table",
        json!({
            "id": "01-create-table",
            "checks": [
                {"name": "c", "query": "SELECT 1", "expected": "[]", "description": ""},
                {"name": "a", "query": "SELECT 1", "expected": "[]", "description": ""},
                {"name": "b", "query": "SELECT 1", "expected": "[]", "description": ""}
            ]
        }),
    );

    let exercise = ws.grader().catalog().load_exercise("01-create-table").unwrap();
    let names: Vec<&str> = exercise.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

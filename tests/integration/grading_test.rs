//! End-to-end grading tests against the embedded engine.

use super::common::Workspace;
use pretty_assertions::assert_eq;
use serde_json::json;
use sql_grader::error::GraderError;

const EXERCISE: &str = "01-create-table";

fn create_table_exercise(ws: &Workspace) {
    ws.add_exercise(
        EXERCISE,
        json!({
            "id": EXERCISE,
            "name": "Create a table",
            "description": "Create table t holding the value 1",
            "solution_sql": "solutions/01-create-table.sql",
            "checks": [{
                "name": "t contains 1",
                "query": "SELECT x FROM t",
                "expected": "[{\"x\":1}]",
                "description": "Table t should contain exactly one row with x = 1"
            }]
        }),
    );
}

#[tokio::test]
async fn test_correct_solution_passes() {
    let ws = Workspace::new();
    create_table_exercise(&ws);
    ws.add_solution(EXERCISE, "CREATE TABLE t(x INT); INSERT INTO t VALUES (1);");

    let (exercise, result) = ws.grader().grade(EXERCISE).await.unwrap();
    assert_eq!(exercise.name, "Create a table");
    assert!(result.passed);
    assert_eq!(result.exercise_id, EXERCISE);
    assert_eq!(result.checks.len(), 1);
    assert_eq!(result.checks[0].message, "Passed!");
}

#[tokio::test]
async fn test_missing_row_reports_both_encodings() {
    let ws = Workspace::new();
    create_table_exercise(&ws);
    ws.add_solution(EXERCISE, "CREATE TABLE t(x INT);");

    let (_, result) = ws.grader().grade(EXERCISE).await.unwrap();
    assert!(!result.passed);

    let check = &result.checks[0];
    assert_eq!(
        check.message,
        "Table t should contain exactly one row with x = 1"
    );
    assert_eq!(check.expected.as_deref(), Some(r#"[{"x":1}]"#));
    assert_eq!(check.actual.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_missing_solution_file() {
    let ws = Workspace::new();
    create_table_exercise(&ws);

    let err = ws.grader().grade(EXERCISE).await.unwrap_err();
    match err {
        GraderError::SolutionNotFound(path) => {
            assert_eq!(path, ws.root().join("solutions").join("01-create-table.sql"))
        }
        other => panic!("Expected SolutionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_exercise() {
    let ws = Workspace::new();
    let err = ws.grader().grade("99-missing").await.unwrap_err();
    assert!(matches!(err, GraderError::NotFound(_)));
}

#[tokio::test]
async fn test_missing_setup_file_aborts() {
    let ws = Workspace::new();
    ws.add_exercise(
        "02-query",
        json!({
            "id": "02-query",
            "setup_sql": "setup.sql",
            "checks": [{"name": "n", "query": "SELECT 1 AS n", "expected": "[{\"n\":1}]", "description": ""}]
        }),
    );
    ws.add_solution("02-query", "SELECT 1;");

    let err = ws.grader().grade("02-query").await.unwrap_err();
    assert!(matches!(err, GraderError::Environment(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_setup_state_is_visible_to_solution() {
    let ws = Workspace::new();
    ws.add_exercise(
        "03-update",
        json!({
            "id": "03-update",
            "setup_sql": "setup.sql",
            "checks": [{
                "name": "prices doubled",
                "query": "SELECT name, price FROM products ORDER BY id",
                "expected": "[{\"name\": \"pen\", \"price\": 3.0}, {\"price\": 5, \"name\": \"ink\"}]",
                "description": "Every price should be doubled"
            }]
        }),
    );
    ws.add_exercise_file(
        "03-update",
        "setup.sql",
        "CREATE TABLE products(id INTEGER PRIMARY KEY, name TEXT, price REAL);
         INSERT INTO products(name, price) VALUES ('pen', 1.5), ('ink', 2.5);",
    );
    ws.add_solution("03-update", "UPDATE products SET price = price * 2;");

    let (_, result) = ws.grader().grade("03-update").await.unwrap();
    assert!(result.passed, "{:?}", result.checks);
}

#[tokio::test]
async fn test_broken_setup_sql_is_environment_error() {
    let ws = Workspace::new();
    ws.add_exercise("04-setup", json!({"id": "04-setup", "setup_sql": "setup.sql"}));
    ws.add_exercise_file("04-setup", "setup.sql", "CREATE TABLE (;");
    ws.add_solution("04-setup", "SELECT 1;");

    let err = ws.grader().grade("04-setup").await.unwrap_err();
    assert!(matches!(err, GraderError::Environment(_)));
    assert!(!err.is_learner_error());
}

#[tokio::test]
async fn test_learner_syntax_error_runs_no_checks() {
    let ws = Workspace::new();
    create_table_exercise(&ws);
    ws.add_solution(EXERCISE, "CREAT TABLE t(x INT);");

    let err = ws.grader().grade(EXERCISE).await.unwrap_err();
    match err {
        GraderError::Learner(msg) => assert!(msg.contains("syntax error"), "got: {msg}"),
        other => panic!("Expected learner error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_expected_json_is_isolated() {
    let ws = Workspace::new();
    ws.add_exercise(
        "05-mixed",
        json!({
            "id": "05-mixed",
            "checks": [
                {"name": "broken", "query": "SELECT x FROM t", "expected": "[{x: 1}]", "description": ""},
                {"name": "fine", "query": "SELECT x FROM t", "expected": "[{\"x\": 1}]", "description": ""}
            ]
        }),
    );
    ws.add_solution("05-mixed", "CREATE TABLE t(x INT); INSERT INTO t VALUES (1);");

    let (_, result) = ws.grader().grade("05-mixed").await.unwrap();
    assert!(!result.passed);
    assert!(!result.checks[0].passed);
    assert!(result.checks[0].message.starts_with("Invalid expected JSON"));
    assert!(result.checks[1].passed);
}

#[tokio::test]
async fn test_row_permutation_fails() {
    let ws = Workspace::new();
    ws.add_exercise(
        "06-order",
        json!({
            "id": "06-order",
            "checks": [{
                "name": "ordered",
                "query": "SELECT x FROM t ORDER BY x DESC",
                "expected": "[{\"x\": 1}, {\"x\": 2}]",
                "description": "Rows must be in ascending order"
            }]
        }),
    );
    ws.add_solution("06-order", "CREATE TABLE t(x INT); INSERT INTO t VALUES (1), (2);");

    let (_, result) = ws.grader().grade("06-order").await.unwrap();
    assert!(!result.passed);
    assert_eq!(result.checks[0].actual.as_deref(), Some(r#"[{"x":2},{"x":1}]"#));
}

#[tokio::test]
async fn test_zero_checks_pass() {
    let ws = Workspace::new();
    ws.add_exercise("07-empty", json!({"id": "07-empty"}));
    ws.add_solution("07-empty", "CREATE TABLE t(x INT);");

    let (_, result) = ws.grader().grade("07-empty").await.unwrap();
    assert!(result.passed);
    assert!(result.checks.is_empty());
}

#[tokio::test]
async fn test_runs_do_not_share_state() {
    let ws = Workspace::new();
    create_table_exercise(&ws);
    ws.add_solution(EXERCISE, "CREATE TABLE t(x INT); INSERT INTO t VALUES (1);");

    let grader = ws.grader();
    let (_, first) = grader.grade(EXERCISE).await.unwrap();
    // A second run would fail on CREATE TABLE if the first run's table survived
    let (_, second) = grader.grade(EXERCISE).await.unwrap();
    assert!(first.passed);
    assert!(second.passed);
}

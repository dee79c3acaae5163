use std::fs;
use std::path::PathBuf;

use chair::{ErrorKind, ErrorTier, Table, Value};
use chair_config::{Environment, TableConfig, load_config_from};
use chair_telemetry::tracing::init_test_tracing;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chair-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn table_from_layered_configuration() {
    init_test_tracing();

    let dir = scratch_dir("books-config");
    fs::write(
        dir.join("base.yaml"),
        "name: books\ncolumns: [id, title, author]\nprimary_key: title\n",
    )
    .unwrap();
    fs::write(dir.join("prod.yaml"), "indices: [author]\n").unwrap();

    let mut table = Table::from_config_dir(&dir, Environment::Prod).unwrap();

    assert_eq!(table.name(), Some("books"));
    assert_eq!(table.primary_key(), Some("title"));
    assert_eq!(table.indices(), vec!["author"]);

    table
        .insert([
            ("id", Value::from(0)),
            ("title", Value::from("War and Peace")),
            ("author", Value::from("Leo Tolstoy")),
        ])
        .unwrap();
    assert!(table.find("War and Peace").is_some());
    assert_eq!(table.where_column_is("author", "Leo Tolstoy").len(), 1);
}

#[test]
fn layered_configuration_matches_loaded_config() {
    let dir = scratch_dir("numbers-config");
    fs::write(dir.join("base.json"), r#"{ "name": "numbers", "columns": ["num", "string"] }"#)
        .unwrap();
    fs::write(dir.join("dev.yml"), "primary_key: num\nindices: [string]\n").unwrap();

    let config: TableConfig = load_config_from(&dir, Environment::Dev).unwrap();
    let table = Table::from_config_dir(&dir, Environment::Dev).unwrap();

    assert_eq!(config.primary_key.as_deref(), table.primary_key());
    assert_eq!(table.columns(), vec!["num", "string"]);
    assert_eq!(table.indices(), vec!["string"]);
}

#[test]
fn missing_environment_file_is_rejected() {
    let dir = scratch_dir("partial-config");
    fs::write(dir.join("base.yaml"), "name: books\ncolumns: [id]\n").unwrap();

    let err = Table::from_config_dir(&dir, Environment::Prod).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert!(err.to_string().contains("prod"));

    let err = Table::from_config_dir(&dir.join("absent"), Environment::Dev).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}

#[test]
fn table_from_json_configuration() {
    let config: TableConfig = serde_json::from_str(
        r#"{ "name": "numbers", "columns": ["num", "string"], "primary_key": "num" }"#,
    )
    .unwrap();

    let table = Table::from_config(&config).unwrap();

    assert_eq!(table.columns(), vec!["num", "string"]);
    assert!(table.indices().is_empty());
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = TableConfig {
        name: "books".to_string(),
        columns: vec!["id".to_string(), "title".to_string()],
        primary_key: Some("id".to_string()),
        indices: vec!["id".to_string()],
    };

    let err = Table::from_config(&config).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    assert_eq!(err.kind().tier(), ErrorTier::Usage);
    assert!(err.to_string().contains("primary key"));
}

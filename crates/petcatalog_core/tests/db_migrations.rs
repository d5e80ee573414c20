use petcatalog_core::db::migrations::latest_version;
use petcatalog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_provisions_pets_table() {
    let conn = open_db_in_memory().expect("in-memory db should open");

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        table_columns(&conn, "pets"),
        vec!["_id", "name", "breed", "gender", "weight"]
    );
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("pets.sqlite3");

    let conn_first = open_db(&path).expect("file db should open");
    conn_first
        .execute("INSERT INTO pets (name) VALUES ('Toto');", [])
        .expect("insert should succeed");
    drop(conn_first);

    let conn_second = open_db(&path).expect("file db should open");
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM pets;", [], |row| row.get(0))
        .expect("count should succeed");
    assert_eq!(count, 1);
}

#[test]
fn schema_rejects_out_of_range_values() {
    let conn = open_db_in_memory().expect("in-memory db should open");

    assert!(conn
        .execute("INSERT INTO pets (name, gender) VALUES ('Toto', 5);", [])
        .is_err());
    assert!(conn
        .execute("INSERT INTO pets (name, weight) VALUES ('Toto', -1);", [])
        .is_err());
    assert!(conn
        .execute("INSERT INTO pets (breed) VALUES ('Terrier');", [])
        .is_err());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).expect("raw connection should open");
    conn.execute_batch("PRAGMA user_version = 999;")
        .expect("pragma should apply");
    drop(conn);

    let err = open_db(&path).expect_err("newer schema must be refused");
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .expect("user_version should be readable")
}

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .expect("table_info should prepare");
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .expect("table_info should run")
        .collect::<Result<Vec<_>, _>>()
        .expect("column names should decode")
}

use questions_core::db::migrations::latest_version;
use questions_core::db::{open_db, open_db_in_memory, open_db_read_only, DbError};
use questions_core::{SqliteQuestionsService, User};
use rusqlite::Connection;
use std::path::Path;

#[test]
fn open_db_in_memory_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["users", "questions", "replies", "question_follows"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO questions (title, body, user_id) VALUES ('orphan', 'x', 404);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute_batch("INSERT INTO users (id, fname, lname) VALUES (1, 'Alan', 'Turing');")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let service = SqliteQuestionsService::for_connection(&conn_second).unwrap();
    assert_eq!(
        service.list_all_users().unwrap(),
        vec![User {
            id: 1,
            fname: "Alan".to_string(),
            lname: "Turing".to_string(),
        }]
    );
}

#[test]
fn open_db_completes_partial_legacy_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                fname TEXT NOT NULL,
                lname TEXT NOT NULL
             );
             CREATE TABLE questions (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
             );
             INSERT INTO users (id, fname, lname) VALUES (1, 'Edsger', 'Dijkstra');
             INSERT INTO questions (id, title, body, user_id)
                VALUES (1, 'GOTO', 'Harmful?', 1);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "replies");
    assert_table_exists(&conn, "question_follows");

    let service = SqliteQuestionsService::for_connection(&conn).unwrap();
    let questions = service.find_questions_by_author(1).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].title, "GOTO");
}

#[test]
fn open_db_leaves_complete_legacy_database_unstamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.db");
    write_legacy_database(&path);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);

    let service = SqliteQuestionsService::for_connection(&conn).unwrap();
    assert_eq!(service.list_all_users().unwrap().len(), 1);
    assert_eq!(service.find_followers_of_question(1).unwrap().len(), 1);
}

#[test]
fn open_db_read_only_reads_complete_legacy_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.db");
    write_legacy_database(&path);

    let conn = open_db_read_only(&path).unwrap();
    let service = SqliteQuestionsService::for_connection(&conn).unwrap();
    let users = service.list_all_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].fname, "Barbara");
    assert_eq!(service.find_most_followed_questions(5).unwrap().len(), 1);

    let write = conn.execute(
        "INSERT INTO users (fname, lname) VALUES ('Should', 'Fail');",
        [],
    );
    assert!(write.is_err());
}

#[test]
fn open_db_reads_legacy_file_with_read_only_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.db");
    write_legacy_database(&path);

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    std::fs::set_permissions(&path, permissions).unwrap();

    let conn = open_db(&path).unwrap();
    let service = SqliteQuestionsService::for_connection(&conn).unwrap();
    assert_eq!(service.find_questions_by_author(1).unwrap().len(), 1);
}

#[test]
fn open_db_read_only_on_missing_file_returns_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");

    let err = open_db_read_only(&path).unwrap_err();
    assert!(
        matches!(err, DbError::Connection { .. }),
        "unexpected error: {err}"
    );
    assert!(!path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_path_in_missing_directory_returns_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("questions.db");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Connection { path: reported, .. } => {
            assert!(reported.ends_with("questions.db"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_non_database_file_returns_connection_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text, not an sqlite file\n".repeat(64)).unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(err, DbError::Connection { .. }),
        "unexpected error: {err}"
    );
}

// Same layout an external import script produces, without a version stamp.
fn write_legacy_database(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            fname TEXT NOT NULL,
            lname TEXT NOT NULL
         );
         CREATE TABLE questions (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            user_id INTEGER NOT NULL
         );
         CREATE TABLE question_follows (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            question_id INTEGER NOT NULL
         );
         CREATE TABLE replies (
            id INTEGER PRIMARY KEY,
            question_id INTEGER NOT NULL,
            parent_reply_id INTEGER,
            user_id INTEGER NOT NULL,
            body TEXT NOT NULL
         );
         INSERT INTO users (id, fname, lname) VALUES (1, 'Barbara', 'Liskov');
         INSERT INTO questions (id, title, body, user_id)
            VALUES (1, 'Substitution', 'When is a subtype safe?', 1);
         INSERT INTO question_follows (id, user_id, question_id) VALUES (1, 1, 1);",
    )
    .unwrap();
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

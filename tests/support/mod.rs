//! Shared fixtures for integration tests: seeded SQLite catalogs and legacy
//! indexes on disk, and mirror endpoints on wiremock servers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Id of the convertible entry in [`catalog_database`].
pub const ENTRY_ID: &str = "0a1b2c3d-0000-4000-8000-000000000000";

/// Id of an entry whose application path is empty (already converted).
pub const PROCESSED_ENTRY_ID: &str = "ffff0000-0000-4000-8000-000000000000";

/// Rollback-journal mode keeps the file readable by read-only connections.
async fn writable_pool(db_path: &Path) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    SqlitePool::connect_with(options)
        .await
        .expect("failed to create sqlite file")
}

/// Creates a catalog with one convertible entry launching `launch_command`,
/// one sub-application and one already-processed entry.
pub async fn catalog_database(dir: &Path, launch_command: &str) -> PathBuf {
    let db_path = dir.join("flashpoint.sqlite");
    let pool = writable_pool(&db_path).await;

    for statement in [
        r"CREATE TABLE game (
            id TEXT PRIMARY KEY, title TEXT, library TEXT, playMode TEXT,
            releaseDate TEXT, language TEXT, tagsStr TEXT, source TEXT,
            platformName TEXT, platformsStr TEXT, status TEXT,
            applicationPath TEXT, launchCommand TEXT)",
        r"CREATE TABLE additional_app (
            id TEXT, name TEXT, applicationPath TEXT, launchCommand TEXT,
            parentGameId TEXT)",
    ] {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("failed to create catalog schema");
    }

    sqlx::query(
        r"INSERT INTO game VALUES (?, 'Sample: Game', 'arcade', 'Single Player', '2004',
            NULL, 'Action; Puzzle', 'Example Source', 'Flash', 'Flash', 'Playable',
            'FPSoftware\Flash\flashplayer.exe', ?)",
    )
    .bind(ENTRY_ID)
    .bind(launch_command)
    .execute(&pool)
    .await
    .expect("failed to insert entry");

    sqlx::query(
        r"INSERT INTO game VALUES (?, 'Done Already', 'arcade', '', '', '', '', '', 'Flash',
            'Flash', 'Playable', '', 'http://example.org/done.swf')",
    )
    .bind(PROCESSED_ENTRY_ID)
    .execute(&pool)
    .await
    .expect("failed to insert processed entry");

    sqlx::query(
        r"INSERT INTO additional_app VALUES
            ('a1', 'Notice', ':message:', 'Click to start', ?),
            ('a2', 'Level 2', 'FPSoftware\Flash\flashplayer.exe', 'http://example.org/level2.swf', ?)",
    )
    .bind(ENTRY_ID)
    .bind(ENTRY_ID)
    .execute(&pool)
    .await
    .expect("failed to insert additional apps");

    pool.close().await;
    db_path
}

/// Removes every sub-application row from a catalog made by [`catalog_database`].
pub async fn clear_additional_apps(db_path: &Path) {
    let pool = writable_pool(db_path).await;
    sqlx::query("DELETE FROM additional_app")
        .execute(&pool)
        .await
        .expect("failed to clear additional apps");
    pool.close().await;
}

/// Creates a legacy index whose `files` table holds `rows`.
pub async fn legacy_index_database(dir: &Path, rows: &[&str]) -> PathBuf {
    let db_path = dir.join("ultimate.sqlite");
    let pool = writable_pool(&db_path).await;

    sqlx::query("CREATE TABLE files (path TEXT NOT NULL)")
        .execute(&pool)
        .await
        .expect("failed to create index schema");
    for row in rows {
        sqlx::query("INSERT INTO files (path) VALUES (?)")
            .bind(*row)
            .execute(&pool)
            .await
            .expect("failed to insert index row");
    }

    pool.close().await;
    db_path
}

/// Serves `body` at `server_path` with `200 OK`.
pub async fn mount_file(server: &MockServer, server_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(server_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Writes a config file pointing at the given databases and servers.
pub fn write_config(
    dir: &Path,
    catalog: &Path,
    legacy_index: Option<&Path>,
    file_servers: &[String],
    image_servers: &[String],
) -> PathBuf {
    let mut config = serde_json::json!({
        "FlashpointDatabase": catalog,
        "FileServers": file_servers,
        "ImageServers": image_servers,
        "EntryLanguage": "en",
        "OutputDirectory": dir.join("out"),
        "ConnectTimeoutSecs": 5,
        "RequestTimeoutSecs": 10,
    });
    if let Some(legacy_index) = legacy_index {
        config["UltimateDatabase"] = serde_json::json!(legacy_index);
    }

    let config_path = dir.join("config.json");
    std::fs::write(
        &config_path,
        serde_json::to_string_pretty(&config).expect("failed to serialize config"),
    )
    .expect("failed to write config");
    config_path
}

//! The relational store
//!
//! Owns the SQLite connection, the schema, the write API the surrounding
//! service uses to create entities, and the single read entry point the
//! search engine executes compiled queries through.

use crate::options::StoreOptions;
use crate::schema;
use rusqlite::{params, Connection};
use std::sync::{Mutex, MutexGuard};
use tracing::info;
use xsift_core::{BindValue, Error, Result};

/// The search store
pub struct SearchStore {
    conn: Mutex<Connection>,
}

fn store_err(e: rusqlite::Error) -> Error {
    Error::Store(e.to_string())
}

impl SearchStore {
    /// Open or create a store with the given options
    pub fn open(options: StoreOptions) -> Result<Self> {
        let conn = match &options.path {
            Some(path) => {
                info!("opening search store at {:?}", path);
                Connection::open(path).map_err(store_err)?
            }
            None => Connection::open_in_memory().map_err(store_err)?,
        };

        if options.path.is_some() && options.enable_wal {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(store_err)?;
        }
        if options.enforce_foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")
                .map_err(store_err)?;
        }

        conn.execute_batch(schema::SCHEMA).map_err(store_err)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::open(StoreOptions::in_memory())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Internal("store lock poisoned".to_string()))
    }

    /// Execute a compiled query, substituting the values positionally
    /// for each `?` placeholder left-to-right
    pub fn select_ids(&self, sql: &str, values: &[BindValue]) -> Result<Vec<i64>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(store_err)?;
        let sql_values = values.iter().map(|value| match value {
            BindValue::Text(s) => rusqlite::types::Value::Text(s.clone()),
            BindValue::Integer(i) => rusqlite::types::Value::Integer(*i),
        });
        let rows = stmt
            .query_map(rusqlite::params_from_iter(sql_values), |row| {
                row.get::<_, i64>(0)
            })
            .map_err(store_err)?;

        let mut ids = Vec::new();
        for id in rows {
            ids.push(id.map_err(store_err)?);
        }
        Ok(ids)
    }

    // ========== Projects ==========

    pub fn add_project(&self, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO projects (name) VALUES (?1)", params![name])
            .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_project_metadata(&self, project_id: i64, title: &str, description: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE projects SET title = ?1, description = ?2 WHERE id = ?3",
            params![title, description, project_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn set_project_remoteurl(&self, project_id: i64, remoteurl: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE projects SET remoteurl = ?1 WHERE id = ?2",
            params![remoteurl, project_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    /// Assign a project kind, creating the type row on first use
    pub fn set_project_kind(&self, project_id: i64, kind: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO project_types (name) VALUES (?1)",
            params![kind],
        )
        .map_err(store_err)?;
        conn.execute(
            "UPDATE projects SET type_id = (SELECT id FROM project_types WHERE name = ?1) WHERE id = ?2",
            params![kind, project_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    // ========== Packages ==========

    pub fn add_package(&self, project_id: i64, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO packages (project_id, name) VALUES (?1, ?2)",
            params![project_id, name],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_package_metadata(&self, package_id: i64, title: &str, description: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE packages SET title = ?1, description = ?2 WHERE id = ?3",
            params![title, description, package_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn set_package_kind(&self, package_id: i64, kind: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE packages SET kind = ?1 WHERE id = ?2",
            params![kind, package_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn set_devel_package(&self, package_id: i64, devel_package_id: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE packages SET devel_package_id = ?1 WHERE id = ?2",
            params![devel_package_id, package_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    // ========== Users and roles ==========

    pub fn add_user(&self, login: &str, email: &str, realname: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (login, email, realname) VALUES (?1, ?2, ?3)",
            params![login, email, realname],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_user_state(&self, user_id: i64, state: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE users SET state = ?1 WHERE id = ?2",
            params![state, user_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn add_role(&self, title: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO roles (title) VALUES (?1)", params![title])
            .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_project_relationship(&self, project_id: i64, user_id: i64, role_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO relationships (project_id, user_id, role_id) VALUES (?1, ?2, ?3)",
            params![project_id, user_id, role_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_package_relationship(&self, package_id: i64, user_id: i64, role_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO relationships (package_id, user_id, role_id) VALUES (?1, ?2, ?3)",
            params![package_id, user_id, role_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    // ========== Attributes ==========

    pub fn add_attrib_namespace(&self, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO attrib_namespaces (name) VALUES (?1)",
            params![name],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_attrib_type(&self, namespace_id: i64, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO attrib_types (attrib_namespace_id, name) VALUES (?1, ?2)",
            params![namespace_id, name],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_project_attrib(&self, project_id: i64, attrib_type_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO attribs (attrib_type_id, project_id) VALUES (?1, ?2)",
            params![attrib_type_id, project_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_package_attrib(&self, package_id: i64, attrib_type_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO attribs (attrib_type_id, package_id) VALUES (?1, ?2)",
            params![attrib_type_id, package_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    // ========== Repositories ==========

    pub fn add_repository(&self, project_id: i64, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO repositories (project_id, name) VALUES (?1, ?2)",
            params![project_id, name],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_repository_path(&self, repository_id: i64, link_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO path_elements (repository_id, link_id) VALUES (?1, ?2)",
            params![repository_id, link_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    // ========== Issues ==========

    pub fn add_issue_tracker(&self, name: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO issue_trackers (name) VALUES (?1)",
            params![name],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_issue(&self, tracker_id: i64, name: &str, state: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO issues (issue_tracker_id, name, state) VALUES (?1, ?2, ?3)",
            params![tracker_id, name, state],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_issue_owner(&self, issue_id: i64, user_id: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE issues SET owner_id = ?1 WHERE id = ?2",
            params![user_id, issue_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn link_package_issue(&self, package_id: i64, issue_id: i64, change: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO package_issues (package_id, issue_id, change) VALUES (?1, ?2, ?3)",
            params![package_id, issue_id, change],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    // ========== Requests ==========

    pub fn add_request(&self, creator: &str, state: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO requests (creator, state) VALUES (?1, ?2)",
            params![creator, state],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn set_request_state(
        &self,
        request_id: i64,
        state: &str,
        commenter: &str,
        updated_at: &str,
    ) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "UPDATE requests SET state = ?1, commenter = ?2, updated_at = ?3 WHERE id = ?4",
            params![state, commenter, updated_at, request_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    pub fn add_request_action(
        &self,
        request_id: i64,
        action_type: &str,
        target_project: Option<&str>,
        target_package: Option<&str>,
        source_project: Option<&str>,
        source_package: Option<&str>,
    ) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO request_actions \
             (request_id, type, target_project, target_package, source_project, source_package) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                request_id,
                action_type,
                target_project,
                target_package,
                source_project,
                source_package
            ],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_request_history(&self, request_id: i64, user_id: i64) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO request_histories (request_id, user_id) VALUES (?1, ?2)",
            params![request_id, user_id],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn add_request_review(
        &self,
        request_id: i64,
        by_user: Option<&str>,
        by_group: Option<&str>,
        state: &str,
    ) -> Result<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO request_reviews (request_id, by_user, by_group, state) VALUES (?1, ?2, ?3, ?4)",
            params![request_id, by_user, by_group, state],
        )
        .map_err(store_err)?;
        Ok(conn.last_insert_rowid())
    }
}

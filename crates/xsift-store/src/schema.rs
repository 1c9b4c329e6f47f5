//! Relational schema
//!
//! The base tables and join tables the attribute catalog references.
//! Column names here are load-bearing: the catalog's column expressions
//! and join clauses must resolve against exactly this schema.

/// DDL for every table and index, idempotent
pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS project_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    title TEXT,
    description TEXT,
    remoteurl TEXT,
    type_id INTEGER REFERENCES project_types (id)
);

CREATE TABLE IF NOT EXISTS packages (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES projects (id),
    name TEXT NOT NULL,
    title TEXT,
    description TEXT,
    kind TEXT,
    devel_package_id INTEGER REFERENCES packages (id)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL UNIQUE,
    email TEXT,
    realname TEXT,
    state TEXT NOT NULL DEFAULT 'confirmed'
);

CREATE TABLE IF NOT EXISTS roles (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS relationships (
    id INTEGER PRIMARY KEY,
    project_id INTEGER REFERENCES projects (id),
    package_id INTEGER REFERENCES packages (id),
    user_id INTEGER NOT NULL REFERENCES users (id),
    role_id INTEGER NOT NULL REFERENCES roles (id)
);

CREATE TABLE IF NOT EXISTS attrib_namespaces (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS attrib_types (
    id INTEGER PRIMARY KEY,
    attrib_namespace_id INTEGER NOT NULL REFERENCES attrib_namespaces (id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attribs (
    id INTEGER PRIMARY KEY,
    attrib_type_id INTEGER NOT NULL REFERENCES attrib_types (id),
    project_id INTEGER REFERENCES projects (id),
    package_id INTEGER REFERENCES packages (id)
);

CREATE TABLE IF NOT EXISTS repositories (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES projects (id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS path_elements (
    id INTEGER PRIMARY KEY,
    repository_id INTEGER NOT NULL REFERENCES repositories (id),
    link_id INTEGER NOT NULL REFERENCES repositories (id)
);

CREATE TABLE IF NOT EXISTS issue_trackers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS issues (
    id INTEGER PRIMARY KEY,
    issue_tracker_id INTEGER NOT NULL REFERENCES issue_trackers (id),
    name TEXT NOT NULL,
    state TEXT,
    owner_id INTEGER REFERENCES users (id)
);

CREATE TABLE IF NOT EXISTS package_issues (
    id INTEGER PRIMARY KEY,
    package_id INTEGER NOT NULL REFERENCES packages (id),
    issue_id INTEGER NOT NULL REFERENCES issues (id),
    change TEXT
);

CREATE TABLE IF NOT EXISTS requests (
    id INTEGER PRIMARY KEY,
    creator TEXT NOT NULL,
    state TEXT NOT NULL,
    commenter TEXT,
    updated_at TEXT
);

CREATE TABLE IF NOT EXISTS request_actions (
    id INTEGER PRIMARY KEY,
    request_id INTEGER NOT NULL REFERENCES requests (id),
    type TEXT NOT NULL,
    target_project TEXT,
    target_package TEXT,
    source_project TEXT,
    source_package TEXT
);

CREATE TABLE IF NOT EXISTS request_histories (
    id INTEGER PRIMARY KEY,
    request_id INTEGER NOT NULL REFERENCES requests (id),
    user_id INTEGER NOT NULL REFERENCES users (id)
);

CREATE TABLE IF NOT EXISTS request_reviews (
    id INTEGER PRIMARY KEY,
    request_id INTEGER NOT NULL REFERENCES requests (id),
    by_user TEXT,
    by_group TEXT,
    state TEXT
);

CREATE INDEX IF NOT EXISTS idx_packages_project ON packages (project_id);
CREATE INDEX IF NOT EXISTS idx_packages_name ON packages (name);
CREATE INDEX IF NOT EXISTS idx_relationships_project ON relationships (project_id);
CREATE INDEX IF NOT EXISTS idx_relationships_package ON relationships (package_id);
CREATE INDEX IF NOT EXISTS idx_attribs_project ON attribs (project_id);
CREATE INDEX IF NOT EXISTS idx_attribs_package ON attribs (package_id);
CREATE INDEX IF NOT EXISTS idx_repositories_project ON repositories (project_id);
CREATE INDEX IF NOT EXISTS idx_package_issues_package ON package_issues (package_id);
CREATE INDEX IF NOT EXISTS idx_request_actions_request ON request_actions (request_id);
CREATE INDEX IF NOT EXISTS idx_request_histories_request ON request_histories (request_id);
CREATE INDEX IF NOT EXISTS idx_request_reviews_request ON request_reviews (request_id);
";

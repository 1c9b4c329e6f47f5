//! Searchable entity kinds
//!
//! Every search query is rooted at exactly one entity kind, resolved from
//! the first step of the path expression. Each kind maps 1:1 to a base
//! relation in the store.

use serde::{Deserialize, Serialize};

/// The kinds of entity a search query can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Project,
    Package,
    User,
    Repository,
    Issue,
    Request,
}

impl EntityKind {
    /// All entity kinds, in base-table order
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Project,
        EntityKind::Package,
        EntityKind::User,
        EntityKind::Repository,
        EntityKind::Issue,
        EntityKind::Request,
    ];

    /// Resolve a root-step name to an entity kind.
    ///
    /// Note the `person` alias: the public query language calls the user
    /// table `person`, matching the element name in rendered results.
    pub fn from_root_name(name: &str) -> Option<Self> {
        match name {
            "project" => Some(EntityKind::Project),
            "package" => Some(EntityKind::Package),
            "person" => Some(EntityKind::User),
            "repository" => Some(EntityKind::Repository),
            "issue" => Some(EntityKind::Issue),
            "request" => Some(EntityKind::Request),
            _ => None,
        }
    }

    /// The base relation this kind selects from
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Package => "packages",
            EntityKind::User => "users",
            EntityKind::Repository => "repositories",
            EntityKind::Issue => "issues",
            EntityKind::Request => "requests",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_name_resolution() {
        assert_eq!(
            EntityKind::from_root_name("package"),
            Some(EntityKind::Package)
        );
        assert_eq!(EntityKind::from_root_name("person"), Some(EntityKind::User));
        assert_eq!(
            EntityKind::from_root_name("repository"),
            Some(EntityKind::Repository)
        );
        assert_eq!(EntityKind::from_root_name("node"), None);
    }

    #[test]
    fn test_table_names() {
        assert_eq!(EntityKind::Package.table(), "packages");
        assert_eq!(EntityKind::User.table(), "users");
        assert_eq!(EntityKind::Request.table(), "requests");
    }

    #[test]
    fn test_every_kind_has_a_root_name() {
        // person is the odd one out; the others match their singular form
        for kind in EntityKind::ALL {
            let name = match kind {
                EntityKind::User => "person",
                EntityKind::Project => "project",
                EntityKind::Package => "package",
                EntityKind::Repository => "repository",
                EntityKind::Issue => "issue",
                EntityKind::Request => "request",
            };
            assert_eq!(EntityKind::from_root_name(name), Some(kind));
        }
    }
}

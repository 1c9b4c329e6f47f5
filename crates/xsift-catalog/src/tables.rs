//! Per-entity attribute tables
//!
//! Mechanical enumeration of every attribute path the search API accepts,
//! per entity kind. Join clauses that several attributes share must be
//! spelled identically so they collapse to one join at assembly time.

use crate::catalog::AttributeSpec;
use std::collections::HashMap;

// Join fragments shared by several attribute paths.
const PKG_RELATIONSHIPS: &str = "LEFT JOIN relationships ON relationships.package_id = packages.id";
const PRJ_RELATIONSHIPS: &str = "LEFT JOIN relationships ON relationships.project_id = projects.id";
const REL_USERS: &str = "LEFT JOIN users ON users.id = relationships.user_id";
const REL_ROLES: &str = "LEFT JOIN roles ON roles.id = relationships.role_id";
const PKG_ISSUES: &str = "LEFT JOIN package_issues ON package_issues.package_id = packages.id";
const PKG_ISSUES_ISSUES: &str = "LEFT JOIN issues ON issues.id = package_issues.issue_id";
const REQ_HISTORIES: &str =
    "LEFT JOIN request_histories ON request_histories.request_id = requests.id";
const REQ_HISTORY_USERS: &str =
    "LEFT JOIN users AS history_users ON history_users.id = request_histories.user_id";
const REQ_ACTIONS: &str = "LEFT JOIN request_actions ON request_actions.request_id = requests.id";
const REQ_REVIEWS: &str = "LEFT JOIN request_reviews ON request_reviews.request_id = requests.id";
const REPO_PATHS: &str = "LEFT JOIN path_elements ON path_elements.repository_id = repositories.id";
const REPO_PATH_LINKS: &str =
    "LEFT JOIN repositories AS linked_repositories ON linked_repositories.id = path_elements.link_id";

pub(crate) fn packages() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@name", AttributeSpec::column("packages.name")),
        (
            "@project",
            AttributeSpec::joined(
                "projects.name",
                &["LEFT JOIN projects ON projects.id = packages.project_id"],
            ),
        ),
        ("title", AttributeSpec::column("packages.title")),
        ("description", AttributeSpec::column("packages.description")),
        ("kind", AttributeSpec::column("packages.kind")),
        (
            "devel/@package",
            AttributeSpec::joined(
                "devel_packages.name",
                &["LEFT JOIN packages AS devel_packages ON devel_packages.id = packages.devel_package_id"],
            ),
        ),
        (
            "devel/@project",
            AttributeSpec::joined(
                "devel_projects.name",
                &[
                    "LEFT JOIN packages AS devel_packages ON devel_packages.id = packages.devel_package_id",
                    "LEFT JOIN projects AS devel_projects ON devel_projects.id = devel_packages.project_id",
                ],
            ),
        ),
        (
            "person/@userid",
            AttributeSpec::joined("users.login", &[PKG_RELATIONSHIPS, REL_USERS]),
        ),
        (
            "person/@role",
            AttributeSpec::joined("roles.title", &[PKG_RELATIONSHIPS, REL_ROLES]),
        ),
        (
            "attribute/@name",
            AttributeSpec::split(
                "attrib_namespaces.name = ? AND attrib_types.name",
                &[
                    "LEFT JOIN attribs ON attribs.package_id = packages.id",
                    "LEFT JOIN attrib_types ON attrib_types.id = attribs.attrib_type_id",
                    "LEFT JOIN attrib_namespaces ON attrib_namespaces.id = attrib_types.attrib_namespace_id",
                ],
                ':',
            ),
        ),
        (
            "issue/@name",
            AttributeSpec::joined("issues.name", &[PKG_ISSUES, PKG_ISSUES_ISSUES]),
        ),
        (
            "issue/@change",
            AttributeSpec::joined("package_issues.change", &[PKG_ISSUES]),
        ),
        (
            "issue/@tracker",
            AttributeSpec::joined(
                "issue_trackers.name",
                &[
                    PKG_ISSUES,
                    PKG_ISSUES_ISSUES,
                    "LEFT JOIN issue_trackers ON issue_trackers.id = issues.issue_tracker_id",
                ],
            ),
        ),
        (
            "issue/owner/@login",
            AttributeSpec::joined(
                "issue_owners.login",
                &[
                    PKG_ISSUES,
                    PKG_ISSUES_ISSUES,
                    "LEFT JOIN users AS issue_owners ON issue_owners.id = issues.owner_id",
                ],
            ),
        ),
        (
            "issue/owner/@email",
            AttributeSpec::joined(
                "issue_owners.email",
                &[
                    PKG_ISSUES,
                    PKG_ISSUES_ISSUES,
                    "LEFT JOIN users AS issue_owners ON issue_owners.id = issues.owner_id",
                ],
            ),
        ),
    ])
}

pub(crate) fn projects() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@name", AttributeSpec::column("projects.name")),
        (
            "@kind",
            AttributeSpec::joined(
                "project_types.name",
                &["LEFT JOIN project_types ON project_types.id = projects.type_id"],
            ),
        ),
        ("title", AttributeSpec::column("projects.title")),
        ("description", AttributeSpec::column("projects.description")),
        ("remoteurl", AttributeSpec::column("projects.remoteurl")),
        (
            "person/@userid",
            AttributeSpec::joined("users.login", &[PRJ_RELATIONSHIPS, REL_USERS]),
        ),
        (
            "person/@role",
            AttributeSpec::joined("roles.title", &[PRJ_RELATIONSHIPS, REL_ROLES]),
        ),
        (
            "attribute/@name",
            AttributeSpec::split(
                "attrib_namespaces.name = ? AND attrib_types.name",
                &[
                    "LEFT JOIN attribs ON attribs.project_id = projects.id",
                    "LEFT JOIN attrib_types ON attrib_types.id = attribs.attrib_type_id",
                    "LEFT JOIN attrib_namespaces ON attrib_namespaces.id = attrib_types.attrib_namespace_id",
                ],
                ':',
            ),
        ),
        (
            "package/@name",
            AttributeSpec::joined(
                "packages.name",
                &["LEFT JOIN packages ON packages.project_id = projects.id"],
            ),
        ),
        (
            "repository/@name",
            AttributeSpec::joined(
                "repositories.name",
                &["LEFT JOIN repositories ON repositories.project_id = projects.id"],
            ),
        ),
    ])
}

pub(crate) fn users() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@login", AttributeSpec::column("users.login")),
        ("@email", AttributeSpec::column("users.email")),
        ("@realname", AttributeSpec::column("users.realname")),
        ("@state", AttributeSpec::column("users.state")),
    ])
}

pub(crate) fn repositories() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@name", AttributeSpec::column("repositories.name")),
        (
            "@project",
            AttributeSpec::joined(
                "projects.name",
                &["LEFT JOIN projects ON projects.id = repositories.project_id"],
            ),
        ),
        (
            "path/@repository",
            AttributeSpec::joined("linked_repositories.name", &[REPO_PATHS, REPO_PATH_LINKS]),
        ),
        (
            "path/@project",
            AttributeSpec::joined(
                "linked_projects.name",
                &[
                    REPO_PATHS,
                    REPO_PATH_LINKS,
                    "LEFT JOIN projects AS linked_projects ON linked_projects.id = linked_repositories.project_id",
                ],
            ),
        ),
    ])
}

pub(crate) fn issues() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@name", AttributeSpec::column("issues.name")),
        ("@state", AttributeSpec::column("issues.state")),
        (
            "@tracker",
            AttributeSpec::joined(
                "issue_trackers.name",
                &["LEFT JOIN issue_trackers ON issue_trackers.id = issues.issue_tracker_id"],
            ),
        ),
        (
            "owner/@login",
            AttributeSpec::joined(
                "users.login",
                &["LEFT JOIN users ON users.id = issues.owner_id"],
            ),
        ),
        (
            "owner/@email",
            AttributeSpec::joined(
                "users.email",
                &["LEFT JOIN users ON users.id = issues.owner_id"],
            ),
        ),
    ])
}

pub(crate) fn requests() -> HashMap<&'static str, AttributeSpec> {
    HashMap::from([
        ("@id", AttributeSpec::column("requests.id")),
        ("@creator", AttributeSpec::column("requests.creator")),
        ("state/@name", AttributeSpec::column("requests.state")),
        ("state/@who", AttributeSpec::column("requests.commenter")),
        ("state/@when", AttributeSpec::column("requests.updated_at")),
        (
            "action/@type",
            AttributeSpec::joined("request_actions.type", &[REQ_ACTIONS]),
        ),
        (
            "action/target/@project",
            AttributeSpec::joined("request_actions.target_project", &[REQ_ACTIONS]),
        ),
        (
            "action/target/@package",
            AttributeSpec::joined("request_actions.target_package", &[REQ_ACTIONS]),
        ),
        (
            "action/source/@project",
            AttributeSpec::joined("request_actions.source_project", &[REQ_ACTIONS]),
        ),
        (
            "action/source/@package",
            AttributeSpec::joined("request_actions.source_package", &[REQ_ACTIONS]),
        ),
        (
            "history/@who",
            AttributeSpec::joined("history_users.login", &[REQ_HISTORIES, REQ_HISTORY_USERS]),
        ),
        (
            "review/@by_user",
            AttributeSpec::joined("request_reviews.by_user", &[REQ_REVIEWS]),
        ),
        (
            "review/@by_group",
            AttributeSpec::joined("request_reviews.by_group", &[REQ_REVIEWS]),
        ),
        (
            "review/@state",
            AttributeSpec::joined("request_reviews.state", &[REQ_REVIEWS]),
        ),
        // Matches the request creator or anyone recorded in its history.
        // The expression carries its own first placeholder; the literal
        // binds twice.
        (
            "person/@userid",
            AttributeSpec::double(
                "history_users.login = ? OR requests.creator",
                &[REQ_HISTORIES, REQ_HISTORY_USERS],
            ),
        ),
        // Legacy query shape produced by the old submit-request API;
        // accepted but never matches.
        ("submit/target/@project", AttributeSpec::empty()),
        ("submit/source/@project", AttributeSpec::empty()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_paths_share_join_text() {
        let table = packages();
        let name = table.get("issue/@name").unwrap();
        let tracker = table.get("issue/@tracker").unwrap();
        assert_eq!(name.joins[0], tracker.joins[0]);
        assert_eq!(name.joins[1], tracker.joins[1]);
    }

    #[test]
    fn test_request_double_and_history_share_joins() {
        let table = requests();
        let double = table.get("person/@userid").unwrap();
        let history = table.get("history/@who").unwrap();
        assert_eq!(double.joins, history.joins);
    }
}

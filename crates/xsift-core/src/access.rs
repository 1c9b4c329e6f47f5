//! Access-control collaborator interface
//!
//! The repository base relation carries a mandatory visibility floor:
//! repositories belonging to projects the caller may not see are excluded
//! before any user-supplied predicate applies. The policy that decides
//! which projects those are lives outside this component.

/// Supplies the set of project ids the current caller is forbidden to see
pub trait AccessPolicy {
    /// Project ids whose repositories must be excluded from results
    fn forbidden_projects(&self) -> Vec<i64>;
}

/// A policy with no restrictions; the default for trusted callers
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl AccessPolicy for OpenAccess {
    fn forbidden_projects(&self) -> Vec<i64> {
        Vec::new()
    }
}

/// A fixed deny-list policy, used by the service layer once it has
/// resolved the caller's visibility
#[derive(Debug, Clone, Default)]
pub struct DenyProjects {
    projects: Vec<i64>,
}

impl DenyProjects {
    /// Create a policy hiding the given project ids
    pub fn new<I: IntoIterator<Item = i64>>(projects: I) -> Self {
        Self {
            projects: projects.into_iter().collect(),
        }
    }
}

impl AccessPolicy for DenyProjects {
    fn forbidden_projects(&self) -> Vec<i64> {
        self.projects.clone()
    }
}

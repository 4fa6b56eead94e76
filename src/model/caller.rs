use serde::{Deserialize, Serialize};

/// Caller identity extracted from request headers, used to decide which
/// catalog resources a request may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub name: Option<String>,
    pub roles: Vec<String>,
}

impl CallerIdentity {
    /// Role granted to callers presenting no roles at all.
    pub const ANONYMOUS_ROLE: &'static str = "anonymous";
    /// Role required for write operations.
    pub const ADMIN_ROLE: &'static str = "admin";

    /// Create an identity. Every caller implicitly holds the anonymous
    /// role, so resources tagged "anonymous" are visible to all.
    pub fn new(name: Option<String>, mut roles: Vec<String>) -> Self {
        if !roles.iter().any(|role| role == Self::ANONYMOUS_ROLE) {
            roles.push(Self::ANONYMOUS_ROLE.to_string());
        }
        Self { name, roles }
    }

    pub fn anonymous() -> Self {
        Self::new(None, Vec::new())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::ANONYMOUS_ROLE)
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == Self::ADMIN_ROLE)
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}

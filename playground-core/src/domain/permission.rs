//! Permission and role strings
//!
//! Permissions travel as strings of the form `action("role")`, for example
//! `read("any")` or `update("user:abc")`.

/// A role a permission is granted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Anyone, authenticated or not
    Any,
    /// Any authenticated user
    Users,
    /// Any unauthenticated visitor
    Guests,
    /// A single user
    User(String),
    /// Members of a team
    Team(String),
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Any => write!(f, "any"),
            Role::Users => write!(f, "users"),
            Role::Guests => write!(f, "guests"),
            Role::User(id) => write!(f, "user:{}", id),
            Role::Team(id) => write!(f, "team:{}", id),
        }
    }
}

/// Permission actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Write,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Write => "write",
        }
    }
}

/// Formats a permission string for `action` granted to `role`
pub fn permission(action: Action, role: &Role) -> String {
    format!("{}(\"{}\")", action.as_str(), role)
}

pub fn read(role: &Role) -> String {
    permission(Action::Read, role)
}

pub fn create(role: &Role) -> String {
    permission(Action::Create, role)
}

pub fn update(role: &Role) -> String {
    permission(Action::Update, role)
}

pub fn delete(role: &Role) -> String {
    permission(Action::Delete, role)
}

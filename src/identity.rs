//! Operator identity attached to every mutation for audit purposes.

use serde::{Deserialize, Serialize};

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub name: String,
}

impl Operator {
    /// Create a new operator identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Source of the current operator identity.
pub trait IdentityContext {
    /// The operator performing the current action, if anyone is signed in.
    fn current(&self) -> Option<Operator>;
}

/// Identity fixed for the lifetime of a session (CLI run, test).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    operator: Option<Operator>,
}

impl StaticIdentity {
    /// A session signed in as `operator`.
    pub fn signed_in(operator: Operator) -> Self {
        Self {
            operator: Some(operator),
        }
    }

    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityContext for StaticIdentity {
    fn current(&self) -> Option<Operator> {
        self.operator.clone()
    }
}

impl<T: IdentityContext + ?Sized> IdentityContext for &T {
    fn current(&self) -> Option<Operator> {
        (**self).current()
    }
}

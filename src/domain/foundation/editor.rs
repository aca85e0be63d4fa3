//! Editor identity value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// The identity of an editor as supplied by the host CMS.
///
/// Authentication happens upstream; this service only carries the identity
/// through sessions and broadcasts so clients can render "locked by X".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Editor {
    /// Opaque user identifier.
    pub id: UserId,

    /// Display name shown in lockout modals.
    pub name: String,

    /// Contact email shown in lockout modals.
    pub email: String,
}

impl Editor {
    /// Creates a new editor identity.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a placement application.
///
/// Minted when the wizard starts and carried through to the submission
/// handoff, so a submitted application can be traced back to its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Creates a new random application ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an application ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ApplicationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ApplicationId> for Uuid {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

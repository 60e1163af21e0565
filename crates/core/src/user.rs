use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Signed-in consultant, as supplied by the session collaborator.
///
/// Read-only: nothing in the pipeline mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
}

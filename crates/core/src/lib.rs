//! prospector-core: domain model for the consultant pipeline.
//!
//! Provides the closed enums (status, source, relationship, task bucket),
//! the `Contact` and `Task` records, the read-only `UserContext`, and the
//! `Clock` abstraction every stamping mutation goes through.
//!
//! Enum-valued input is parsed through `FromStr` implementations that fail
//! with [`ParseEnumError`] rather than falling back to a default.

pub mod clock;
pub mod contact;
pub mod dates;
pub mod error;
mod label;
pub mod status;
pub mod task;
pub mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use contact::{Contact, ConversionProbability, Relationship, Source};
pub use error::{ModelError, ParseEnumError};
pub use status::Status;
pub use task::{Task, TaskBucket};
pub use user::UserContext;

pub mod conformance;
mod error;
mod memory;
mod traits;

pub use error::StorageError;
pub use memory::MemoryContactStore;
pub use traits::ContactStore;

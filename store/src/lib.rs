//! Abstract storage traits for the helm gate.
//!
//! Every storage backend (embedded KV, SQL, in-memory for testing)
//! implements these traits. The engine crates depend only on the traits,
//! so the durable form of the operation table and the relation table is
//! the embedder's choice.

pub mod error;
pub mod meta;
pub mod operation;

pub use error::StoreError;
pub use meta::MetaStore;
pub use operation::OperationStore;

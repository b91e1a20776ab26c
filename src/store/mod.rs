pub mod backend;
pub mod generators;
pub mod repository;

mod errors;

pub use backend::{FileBackend, InMemoryBackend, KeyValueBackend};
pub use errors::StoreError;
pub use generators::{IdGenerator, UuidIdGenerator};
pub use repository::{LocalRecordStore, RecordStore, MATCHES_KEY, PLAYERS_KEY};

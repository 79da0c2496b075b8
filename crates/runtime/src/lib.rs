//! Persistence and orchestration for character sheets.
//!
//! This crate wires the rule engine to storage. Consumers embed
//! [`CharacterService`] to create players and characters, place and remove
//! mods, and import or export records.
//!
//! Modules are organized by responsibility:
//! - [`repository`] provides the key-to-JSON-blob stores (SQLite and in-memory)
//! - [`service`] runs the load, mutate, rebuild, save cycle
pub mod repository;
pub mod service;

pub use repository::{
    InMemoryRepository, Record, Repositories, Repository, RepositoryError, SqliteStore,
    SqliteTable,
};
pub use service::{
    CharacterExport, CharacterService, FORMAT_VERSION, ImportError, Result, ServiceError,
    TalentGrant,
};

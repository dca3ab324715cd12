//! Durable news storage: the deduplicated corpus and its per-target shards.
//!
//! The [`Corpus`] is the single source of truth. Shards are a view derived
//! from it by [`partition`] and rewritten wholesale on every save.

pub mod corpus;
pub mod error;
pub mod json_file;
pub mod shards;

pub use corpus::Corpus;
pub use error::PersistenceError;
pub use shards::{
    load_shard, partition, partition_and_save, save_shards, shard_path, PartitionSummary, Shards,
};

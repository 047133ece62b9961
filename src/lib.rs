//! # hivemeta
//!
//! Harvests table metadata from Hive-family engines (Hive, Impala, HiveServer2)
//! and republishes it as asset records.
//!
//! Most of the crate is plumbing around two pieces:
//!
//! - the [row classifier](hive::describe), which splits a `DESCRIBE EXTENDED`
//!   result into column descriptors and the trailing detail blob
//! - the [notation decoder](hive::notation), which turns that blob (Hive's
//!   `Table(tableName:x, sd:StorageDescriptor(...))` object notation) into JSON
//!
//! ## Testing
//!
//! Shared fixtures and loaders live in the [testing module](hive::testing).

pub mod hive;

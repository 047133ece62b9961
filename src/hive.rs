//! Main module for hivemeta library functionality

pub mod assets;
pub mod catalog;
pub mod config;
pub mod describe;
pub mod identifiers;
pub mod notation;
pub mod state;
pub mod supplier;
pub mod sync;
pub mod testing;

//! QuickLife save store: snapshots a life-sim session into durable
//! key-value storage, restores it when the environment is ready, and
//! clears it when a new life begins.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod hooks;
pub mod person;
pub mod session;
pub mod snapshot;
pub mod snapshot_store;
pub mod storage;
pub mod types;
pub mod ui;

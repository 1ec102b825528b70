//! impara-core — Drill engine, progress tracking, and scheduling.
//!
//! This crate defines the data model, the traits the rest of impara plugs
//! into (progress stores, consoles, random sources, data sources), and the
//! logic that decides what to quiz next and how a session unfolds.

pub mod conjugator;
pub mod error;
pub mod exercises;
pub mod flow;
pub mod fuzzy;
pub mod mock;
pub mod model;
pub mod preload;
pub mod progress;
pub mod random;
pub mod report;
pub mod scenes;
pub mod scheduler;
pub mod session;
pub mod traits;

//! Decidr - decide what to work on next
//!
//! A single-user task list where every task carries a remaining-time
//! estimate, an optional priority hint and an optional deadline. The
//! library provides:
//! - The priority engine, ranking and suggestion rules (`engine`)
//! - A session owning the task collection (`session`)
//! - SQLite and in-memory persistence (`store`, `db`, `repo`)
//! - rc-file configuration and the CLI
//!
//! # Example
//!
//! ```
//! use decidr::clock::SystemClock;
//! use decidr::engine::SuggestMode;
//! use decidr::models::NewTask;
//! use decidr::session::TaskSession;
//! use decidr::store::MemoryStore;
//!
//! let mut session = TaskSession::open(MemoryStore::new(), SystemClock).unwrap();
//! session.add_task(NewTask {
//!     name: "Answer email".to_string(),
//!     remaining_minutes: 15,
//!     ..Default::default()
//! }).unwrap();
//!
//! let pick = session.suggest(30, SuggestMode::Finishable).unwrap();
//! assert_eq!(pick.map(|r| r.task.name.as_str()), Some("Answer email"));
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod repo;
pub mod session;
pub mod store;
pub mod utils;

// Core data models for decidr

pub mod task;

pub use task::*;

//! HTTP request handlers.

pub mod auth;
pub mod graph;
pub mod health;
pub mod leaderboard;
pub mod marks;
pub mod students;

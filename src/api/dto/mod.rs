//! Request and response bodies for the HTTP surface.

pub mod auth;
pub mod graph;
pub mod health;
pub mod leaderboard;
pub mod marks;
pub mod student;

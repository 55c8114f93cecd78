//! Application layer: use-case services sitting between the HTTP surface
//! and the repositories.

pub mod services;

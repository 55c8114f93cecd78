//! Domain layer: entities, repository contracts and the ranking engine.

pub mod entities;
pub mod ranking;
pub mod repositories;

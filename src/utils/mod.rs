//! Small shared helpers.

pub mod token;

//! API route handlers

pub mod predict;
pub mod predictions;
pub mod schema;
pub mod session;

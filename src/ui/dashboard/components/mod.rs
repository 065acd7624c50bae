//! Dashboard component modules
//!
//! One module per screen region

pub mod admin;
pub mod footer;
pub mod header;
pub mod logs;
pub mod student;
pub mod teacher;

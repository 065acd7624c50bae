//! Background workers feeding the UI

pub mod core;
pub mod lookup;
pub mod poller;
pub mod view;

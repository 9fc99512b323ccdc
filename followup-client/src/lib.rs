pub mod api;
pub mod config;
pub mod controller;
pub mod picker;
pub mod repl;
pub mod session;
pub mod telephony;

//! Interactive dashboard session
//!
//! A reedline-based loop that maps typed commands onto the dashboard
//! controller and renders the resulting state.

pub mod command;
pub mod repl;

pub use command::{CommandError, ReplCommand};
pub use repl::{DashboardRepl, Flow};

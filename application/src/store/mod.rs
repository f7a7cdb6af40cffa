//! Dashboard state container
//!
//! A typed state struct plus the actions that may change it, and the request
//! sequencer that keeps late results from overwriting newer ones.

pub mod notice;
pub mod sequence;
pub mod state;

pub use notice::{Notice, NoticeLevel};
pub use sequence::{RequestChannel, RequestSequencer, RequestTicket};
pub use state::{ChartPanel, DEFAULT_UPLOAD_MESSAGE, DashboardAction, DashboardState};

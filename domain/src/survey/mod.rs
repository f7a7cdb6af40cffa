//! Survey subdomain: records, questions, sentiment and upload selection.

pub mod question;
pub mod record;
pub mod sentiment;
pub mod upload;

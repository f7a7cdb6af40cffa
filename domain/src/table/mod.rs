//! Survey table view: columns, filtering, sorting and pagination.

pub mod column;
pub mod query;

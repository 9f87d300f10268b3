//! CLI command handlers. Each command is in its own file.

mod edit;
mod get;
mod inspect;
mod query;

pub use edit::{run_edit, EditOps};
pub use get::run_get;
pub use inspect::run_inspect;
pub use query::run_query;

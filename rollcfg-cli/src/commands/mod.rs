//! CLI command implementations.
//!
//! - `validate`: check one document or every document in the directory
//! - `compile`: translate a document into gateway routes and upstreams
//! - `diff`: categorized comparison of two documents
//! - `list`: documents in the configuration directory
//! - `show`: per-service overview
//! - `edit-match`: change a header match and write the document back
//! - `completions`: shell completion scripts

pub mod compile;
pub mod completions;
pub mod diff;
pub mod edit_match;
pub mod list;
pub mod show;
pub mod validate;

pub use compile::CompileCommand;
pub use completions::CompletionsCommand;
pub use diff::DiffCommand;
pub use edit_match::EditMatchCommand;
pub use list::ListCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;

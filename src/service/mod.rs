//! StudentContext: staged writes and active/any lookups over the students table.

mod context;
pub use context::StudentContext;

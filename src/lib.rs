//! Estudantes API: CRUD with soft-delete for student records over SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod student;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes_with_ready, student_routes};
pub use service::StudentContext;
pub use state::AppState;
pub use store::{connect, ensure_tables};
pub use student::{Student, StudentDto};

mod project_repository;
mod user_repository;

pub use project_repository::*;
pub use user_repository::*;

mod results_repository;
mod session_repository;

pub use results_repository::*;
pub use session_repository::*;

mod advisor_service;
mod assistant_service;
mod scoring_service;
mod sheets_service;

pub use advisor_service::*;
pub use assistant_service::*;
pub use scoring_service::*;
pub use sheets_service::*;

#[cfg(test)]
mod tests;

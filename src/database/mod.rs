mod migrations;
mod postgres;
mod redis;

pub use migrations::*;
pub use postgres::*;
pub use redis::*;

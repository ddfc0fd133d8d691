mod common;
mod question;
mod results;
mod session;

pub use common::*;
pub use question::*;
pub use results::*;
pub use session::*;

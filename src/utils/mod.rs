mod parse;
pub mod response;
mod validator;

pub use parse::*;
pub use response::*;
pub use validator::*;

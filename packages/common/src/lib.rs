pub mod error;
pub mod json;
pub mod result;
pub mod visitor;

pub use error::*;
pub use json::*;
pub use result::*;
pub use visitor::*;

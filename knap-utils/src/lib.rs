mod catalog;
pub use catalog::*;
mod json;
pub use json::*;
mod report;
pub use report::*;

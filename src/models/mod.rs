pub mod verdict;
pub mod report;

pub use verdict::*;
pub use report::*;

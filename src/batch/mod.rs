pub mod reader;
pub mod runner;

pub use reader::{ColumnSpec, CsvSource, InputRow};
pub use runner::BatchRunner;

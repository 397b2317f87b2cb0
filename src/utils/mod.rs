pub mod file_parsing;
pub mod logging;
pub mod math;

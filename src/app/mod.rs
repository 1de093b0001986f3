pub mod quoting;
pub mod report;

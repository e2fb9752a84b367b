pub mod args;
pub mod diary;
pub mod errors;
pub mod logging;
pub mod parser;
pub mod report;
pub mod source;

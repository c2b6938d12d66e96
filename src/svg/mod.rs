pub mod reader;
pub mod uniquify;
pub mod writer;

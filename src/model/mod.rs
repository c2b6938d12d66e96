pub mod document;
pub mod frame;

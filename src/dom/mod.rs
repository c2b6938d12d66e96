pub mod tree;
pub mod xml;

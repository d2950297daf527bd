pub mod person;
pub mod tree;

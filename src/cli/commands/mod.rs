pub mod build;
pub mod link;
pub mod tools;

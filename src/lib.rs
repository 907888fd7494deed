pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod tools;
pub mod utm;

#[cfg(test)]
pub mod testing;

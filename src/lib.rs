mod aggregate;
pub mod args;
mod chart;
pub mod commands;
mod config;
pub mod console;
mod error;
mod fs;
pub mod ledger;
pub mod model;
pub mod sales;
mod validate;
pub mod variance;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Rejection;
pub use error::Result;

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

#[cfg(test)]
pub mod testing;

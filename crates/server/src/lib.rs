pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod state;

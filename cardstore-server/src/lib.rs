//! Card store server and API.

pub mod app;
pub mod cli;
pub mod config;
pub mod routes;
pub mod store;

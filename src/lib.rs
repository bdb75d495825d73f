pub mod config;
pub mod db;
pub mod errors;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod store;

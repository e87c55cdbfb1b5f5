pub mod client;
pub mod config;
pub mod enums;
pub mod errors;
pub mod models;
pub mod service;
pub mod signer;
pub mod structs;
pub mod transport;

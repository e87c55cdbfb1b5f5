pub mod apis;
pub mod controller;
pub mod dtos;
pub mod enums;
pub mod errors;
pub mod models;
pub mod poller;
pub mod service;

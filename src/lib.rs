pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod locations;
pub mod state;
pub mod storage;

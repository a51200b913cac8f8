pub mod ai;
pub mod bot;
pub mod chat;
pub mod config;
pub mod error;
pub mod freshness;
pub mod models;
pub mod scrapers;
pub mod store;
pub mod webhook;

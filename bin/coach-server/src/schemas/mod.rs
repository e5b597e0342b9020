//! Request / response bodies of the HTTP API.

pub mod chat;
pub mod export;
pub mod session;

//! Request flows behind the HTTP handlers.

pub mod chat;
pub mod export;

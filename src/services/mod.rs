// src/services/mod.rs
pub mod extraction;
pub mod forwarder;
pub mod normalizer;
pub mod session;
pub mod target_resolver;
pub mod url_builder;

// file: src/search/mod.rs
// description: web search client module exports
// reference: internal module structure

pub mod client;

pub use client::{SearchClient, NO_ANSWER, SEARCH_FAILED};

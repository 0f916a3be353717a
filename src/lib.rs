// src/lib.rs

//! bookscout Library
//!
//! Background acquisition of book catalog data: scheduled scrapes of
//! World of Books category pages, heading-based title extraction with a
//! built-in sample fallback, and an atomically swapped in-memory cache
//! serving the JSON API.

pub mod cache;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod services;

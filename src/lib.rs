//! Waypoint - a small URL shortener
//!
//! Short codes map to target URLs in a key-value store. Links may expire,
//! can be soft-deleted and restored, and can show a countdown page before
//! redirecting.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `storage`: link record model and KV backends (memory, redis)
//! - `services`: allocator, lifecycle, mutation, resolver, listing, countdown
//! - `api`: HTTP handlers, HTML pages and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

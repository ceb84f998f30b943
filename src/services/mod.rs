//! Service layer for business logic
//!
//! The engine components are plain functions and small types; [`LinkService`]
//! wires them to a store and a clock.

pub mod allocator;
pub mod countdown;
pub mod lifecycle;
pub mod listing;
pub mod mutation;
pub mod request;
pub mod resolver;

mod link_service;

pub use link_service::*;

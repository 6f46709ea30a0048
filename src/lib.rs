//! # Evently Client Library
//!
//! Client-side core for the Evently event-management app: a typed REST
//! client for the backend API, pagination arithmetic, and the list-view
//! controller that drives paginated views with a stale-response guard.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod notify;
pub mod pagination;
pub mod render;
pub mod telemetry;

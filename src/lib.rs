//! CRT status - PNG visit badges with best-effort client IP resolution
//!
//! This crate provides the HTTP service behind the status badges:
//! - Client IP resolution from proxy and CDN headers
//! - Badge rendering as 200x120 PNG
//! - Per-address, per-page visit counters in the `visitor` table

pub mod client_ip;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod screen;
pub mod services;
pub mod state;
pub mod utils;

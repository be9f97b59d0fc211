//! envwatch: environmental sensor stream monitor.
//!
//! Readings (temperature, humidity, luminosity) are pushed one tick at a time
//! through an [`Engine`](application::services::engine::Engine) that keeps a
//! bounded sliding window, derives rolling statistics, classifies each reading
//! against two-tier thresholds and appends readings and alerts to a durable log.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "server")]
pub mod store;

pub mod api;

#[cfg(feature = "server")]
pub mod rest;

#[cfg(feature = "server")]
pub mod openapi;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod telemetry;

#[cfg(feature = "server")]
pub mod health;

#[cfg(feature = "server")]
pub mod auth;

#[cfg(feature = "server")]
pub mod rate_limit;

// External integrations
#[cfg(feature = "server")]
pub mod sheet;

#[cfg(feature = "server")]
pub mod gemini;

#[cfg(feature = "server")]
pub mod service;

#[cfg(feature = "server")]
pub mod sync;

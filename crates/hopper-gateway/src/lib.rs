//! HTTP surface for the Hopper URL shortener.
//!
//! Maps JSON requests onto a [`hopper_core::Shortener`] and its errors onto
//! status codes. See [`app::App::router`] for the routes.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

//! Things that only run on the server
//!
//! The console itself talks to the REST backend from the browser; the server hosts the app,
//! forwards `/api` and `/media` to the backend and takes care of logging and shutdown.
pub mod config;
pub mod proxy;
pub mod signal_handler;
pub mod tracing_setup;

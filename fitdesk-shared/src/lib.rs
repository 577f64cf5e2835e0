//! Types and logic shared by the console UI and its server
//!
//! Nothing in here touches the browser or the network directly: requests go through the
//! [`api::Transport`] trait and persisted session data through [`session::SessionStore`], so
//! everything can be exercised natively.

pub mod api;
pub mod form;
pub mod manager;
pub mod payload;
pub mod record;
pub mod resources;
pub mod schema;
pub mod session;
pub mod urls;

#[cfg(test)]
mod mock;

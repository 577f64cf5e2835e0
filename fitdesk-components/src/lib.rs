//! Components and browser glue shared by the console pages

pub mod buttons;
pub mod confirm;
pub mod context;
pub mod icons;
#[cfg(feature = "hydrate")]
pub mod logging;
pub mod media;
pub mod notice;
pub mod resource;
pub mod storage;
pub mod transport;

pub const TEXTAREA_DEFAULT_ROWS: i32 = 4;

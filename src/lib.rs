#[cfg(feature = "desktop")]
pub mod camera;
pub mod config;
pub mod gesture;
pub mod hand;
pub mod pipeline;
pub mod render;

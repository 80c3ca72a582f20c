//! macOS packaging drivers: .app bundle build and DMG creation.

pub mod app;
pub mod dmg;

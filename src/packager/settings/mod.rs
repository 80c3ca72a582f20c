//! Configuration structures for packaging operations.
//!
//! This module provides the configuration types consumed by the packaging
//! drivers: application metadata, Python toolchain settings, source file
//! lists, disk-image and customer-package options, and a builder for
//! constructing the combined [`Settings`].

mod app;
mod builder;
mod core;
mod customer;
mod dmg;
mod python;
mod sources;

// Re-export all public types
pub use app::AppSettings;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use customer::CustomerSettings;
pub use dmg::DmgSettings;
pub use python::PythonSettings;
pub use sources::SourceSettings;

//! Driver orchestration and shared build machinery.

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::{calculate_sha256, write_sha256_sidecar};
pub use orchestrator::{PackagedArtifact, Packager};
pub use tool_detection::HAS_HDIUTIL;

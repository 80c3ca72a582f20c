//! Python toolchain provisioning.
//!
//! Locating the interpreter, gating on its version, provisioning the build
//! virtual environment, and running pip/PyInstaller inside it.

mod interpreter;
mod venv;

pub use interpreter::{ensure_minimum_version, locate_interpreter, parse_version, query_version};
pub use venv::{install_requirements, provision_venv, run_pyinstaller, venv_python};

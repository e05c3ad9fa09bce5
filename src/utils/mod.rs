//! Utility modules

pub mod version;

pub use version::{PROGRAM_NAME, VERSION, banner, get_version};

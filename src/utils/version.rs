//! Build information

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the command-line tool
pub const PROGRAM_NAME: &str = "motdplayer";

/// Current crate version
pub fn get_version() -> &'static str {
    VERSION
}

/// Banner logged on startup, with the commit when the build provides one
pub fn banner() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) => format!("{} v{} ({})", PROGRAM_NAME, VERSION, hash),
        None => format!("{} v{}", PROGRAM_NAME, VERSION),
    }
}

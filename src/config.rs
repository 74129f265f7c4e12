use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Symtrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    "symtrack=info,warn".to_string()
}

/// Get the application data directory
/// ~/Symtrack/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Symtrack")
}

/// Path of the SQLite database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("symtrack.db")
}

/// Directory PDF exports are written to
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

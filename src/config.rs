use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wardflow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default port for the HTTP API
pub const DEFAULT_API_PORT: u16 = 8700;

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    "info,wardflow=debug".to_string()
}

/// Get the application data directory
/// ~/Wardflow/ on all platforms
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Wardflow")
}

/// Get the path of the operational record database
pub fn database_path() -> PathBuf {
    app_data_dir().join("records.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Wardflow"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("records.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}

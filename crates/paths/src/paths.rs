//! Path context for runtime environment detection and per-app data paths.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("no local data directory available on this platform")]
    NoDataDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifies the runtime environment where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running via `cargo run` or in development mode
    Development,
    /// Running as an installed binary
    Production,
}

/// Context for managing application paths based on a studio/app structure.
#[derive(Debug, Clone)]
pub struct PathContext {
    environment: RuntimeEnvironment,
    /// Base path for all application data
    base_path: Arc<Path>,
    /// Studio identifier (e.g., "babitdor")
    studio: String,
    /// Application identifier (e.g., "portfolio")
    app_id: &'static str,
}

impl PathContext {
    /// Creates a new PathContext rooted in the platform's local data directory.
    pub fn new(studio: impl Into<String>, app_id: &'static str) -> Result<Self, PathError> {
        let base_path = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
        Ok(Self {
            environment: Self::detect_environment(),
            base_path: base_path.into(),
            studio: studio.into(),
            app_id,
        })
    }

    /// Creates a PathContext with an explicit base path (dev builds and tests).
    pub fn with_base_path(
        base_path: PathBuf,
        studio: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        Self {
            environment: Self::detect_environment(),
            base_path: base_path.into(),
            studio: studio.into(),
            app_id,
        }
    }

    fn detect_environment() -> RuntimeEnvironment {
        if let Ok(exe_path) = std::env::current_exe() {
            if exe_path.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }

        if std::env::var("CARGO").is_ok() || std::env::var("CARGO_MANIFEST_DIR").is_ok() {
            return RuntimeEnvironment::Development;
        }

        RuntimeEnvironment::Production
    }

    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn studio(&self) -> &str {
        &self.studio
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// `<base>/<studio>/<app_id>`
    pub fn app_root(&self) -> PathBuf {
        self.base_path.join(&self.studio).join(self.app_id)
    }

    /// `<app_root>/settings/`
    pub fn settings_dir(&self) -> PathBuf {
        self.app_root().join("settings")
    }

    /// `<app_root>/settings/settings.ron`
    pub fn settings_file(&self) -> PathBuf {
        self.settings_dir().join("settings.ron")
    }

    /// `<app_root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.app_root().join("logs")
    }

    /// `<app_root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Creates the settings and log directories if they are missing.
    pub fn ensure_directories(&self) -> Result<(), PathError> {
        for dir in [self.settings_dir(), self.logs_dir()] {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PathContext {
        PathContext::with_base_path(PathBuf::from("/base"), "studio", "app")
    }

    #[test]
    fn test_path_context_structure() {
        let ctx = ctx();

        assert_eq!(ctx.studio(), "studio");
        assert_eq!(ctx.app_id(), "app");
        assert_eq!(ctx.base_path(), Path::new("/base"));
        assert_eq!(ctx.app_root(), PathBuf::from("/base/studio/app"));
    }

    #[test]
    fn test_settings_paths() {
        assert_eq!(
            ctx().settings_file(),
            PathBuf::from("/base/studio/app/settings/settings.ron")
        );
    }

    #[test]
    fn test_log_file_path() {
        let log_path = ctx().log_file("20240315-120000");
        assert_eq!(
            log_path,
            PathBuf::from("/base/studio/app/logs/app.20240315-120000.log")
        );
    }

    #[test]
    fn test_ensure_directories_creates_layout() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let base = std::env::temp_dir().join(format!("paths_test_{nanos}"));
        let ctx = PathContext::with_base_path(base.clone(), "studio", "app");

        ctx.ensure_directories().expect("create dirs");
        assert!(ctx.settings_dir().is_dir());
        assert!(ctx.logs_dir().is_dir());

        let _ = std::fs::remove_dir_all(base);
    }
}

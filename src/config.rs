use iris_core::IrisConfig;
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/iris.toml";

/// Load tracker settings from the default path.
pub fn load() -> IrisConfig {
    load_from_path(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load tracker settings from an explicit path, falling back to defaults on errors.
pub fn load_from_path(path: &Path) -> IrisConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<IrisConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                IrisConfig::default()
            }
        },
        Err(err) => {
            if path != Path::new(DEFAULT_CONFIG_PATH) {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!("Iris config not found at {}. Using defaults", path.display());
            }
            IrisConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "iris-{name}-{}.toml",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn partial_files_keep_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "raycast_distance = 12.5\n").unwrap();

        let cfg = load_from_path(&path);
        assert_eq!(cfg.raycast_distance, 12.5);
        assert_eq!(cfg.raycast_flags, IrisConfig::default().raycast_flags);
        assert!(!cfg.start_active);
    }

    #[test]
    fn broken_or_missing_files_fall_back() {
        let path = temp_path("broken");
        fs::write(&path, "raycast_distance = \"far\"\n").unwrap();
        assert_eq!(load_from_path(&path), IrisConfig::default());

        let missing = temp_path("missing");
        assert_eq!(load_from_path(&missing), IrisConfig::default());
    }
}

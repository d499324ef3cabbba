//! Document storage configuration.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where physical document files live and which extensions are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage directory. Relative paths are resolved against the process
    /// working directory.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Accepted-extension pattern, matched against the whole suffix
    /// (e.g. `pdf|docx|xlsx|txt`).
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: String,
}

impl StorageConfig {
    /// The storage directory as an absolute path.
    pub fn resolved_directory(&self) -> PathBuf {
        absolute_path(Path::new(&self.directory))
    }
}

/// Make `path` absolute against the working directory, dropping `.`
/// components so recorded paths stay canonical-looking.
pub(crate) fn absolute_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

fn default_directory() -> String {
    "./data/documents".to_string()
}

fn default_accepted_extensions() -> String {
    "pdf|docx|xlsx|txt".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_directory_is_kept() {
        let config = StorageConfig {
            directory: "/var/lib/docvault".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_directory(), PathBuf::from("/var/lib/docvault"));
    }

    #[test]
    fn test_relative_directory_is_made_absolute() {
        let config = StorageConfig::default();
        assert!(config.resolved_directory().is_absolute());
        assert!(config.resolved_directory().ends_with("data/documents"));
    }

    #[test]
    fn test_current_dir_components_are_dropped() {
        let resolved = StorageConfig::default().resolved_directory();
        assert!(
            resolved
                .components()
                .all(|c| !matches!(c, Component::CurDir)),
            "{}",
            resolved.display()
        );
        assert!(!resolved.display().to_string().contains("/./"));

        let absolute = StorageConfig {
            directory: "/srv/./docs".to_string(),
            ..Default::default()
        };
        assert_eq!(absolute.resolved_directory(), PathBuf::from("/srv/docs"));
    }
}

//
//  rollbar-provider
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Low-level file operations behind [`ProviderConfig`](super::ProviderConfig).
//!
//! ```rust,no_run
//! use std::path::Path;
//! use rollbar_provider::config::{config_exists, read_config_file, write_config_file};
//!
//! let path = Path::new("/tmp/rollbar-provider/config.toml");
//!
//! if config_exists(path) {
//!     let content = read_config_file(path)?;
//!     println!("{}", content);
//! } else {
//!     write_config_file(path, "timeout_secs = 60\n")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Notes
//!
//! - Write operations create missing parent directories
//! - On Unix, written files are readable by their owner only, since they
//!   usually hold access tokens

use std::path::Path;

use anyhow::Result;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or is
/// not valid UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Writes `content` to a configuration file, replacing it if it exists.
///
/// # Parameters
///
/// * `path` - Where the file should be written
/// * `content` - The full file content
///
/// # Errors
///
/// Returns an error if the parent directories cannot be created or the file
/// cannot be written.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    restrict_permissions(path)?;
    Ok(())
}

/// Returns `true` if a file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "timeout_secs = 1\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "timeout_secs = 1\n");
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!config_exists(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

//! Path resolution for the local cache directory.
//!
//! XDG-compliant: `$XDG_DATA_HOME/taskboard`, falling back to
//! `~/.local/share/taskboard`.

use std::env;
use std::path::PathBuf;

/// Get the data directory holding the cached entity collections.
///
/// # Panics
/// Panics if neither XDG_DATA_HOME nor HOME is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".local/share")
        });

    data_home.join("taskboard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_ends_with_taskboard() {
        // Just verify the suffix (env vars are unreliable in parallel tests)
        let path = get_data_dir();
        assert!(path.ends_with("taskboard"));
    }
}

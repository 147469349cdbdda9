//! Filesystem locations inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host` in the sandbox; `/host`
//! points at the cwd of the last focused terminal, or the folder Zellij
//! was started from. When that is the user's home directory the data
//! directory below resolves to `~/.local/share/zellij/zinema`.

use std::path::PathBuf;

/// Returns the plugin data directory used for trace output.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zinema")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_the_sandbox_mount() {
        assert_eq!(
            get_data_dir().to_str(),
            Some("/host/.local/share/zellij/zinema")
        );
    }
}

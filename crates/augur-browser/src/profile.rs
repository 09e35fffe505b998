use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Browser profile directories.
///
/// The persistent profile is what makes the bridge usable: login cookies
/// live in it, so an operator signs in once through the visible window and
/// the session survives process restarts without re-authenticating.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// Create or reuse a persistent profile at the given path.
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(Error::Io)?;
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    /// Create a throwaway profile that is deleted on drop. No login state
    /// survives; useful for tests and one-off runs.
    pub fn temporary() -> Result<Self> {
        let temp_dir = tempfile::tempdir().map_err(Error::Io)?;

        Ok(Self {
            path: temp_dir.keep(),
            is_temporary: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_profile_cleans_up_on_drop() {
        let profile = ProfileManager::temporary().unwrap();
        let path = profile.path().to_path_buf();
        assert!(path.is_dir());

        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn test_persistent_profile_is_created_and_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let profile_path = temp_dir.path().join("bridge-profile");
        assert!(!profile_path.exists());

        let profile = ProfileManager::persistent(profile_path.clone()).unwrap();
        assert!(profile_path.is_dir());
        assert!(!profile.is_temporary());

        drop(profile);
        assert!(profile_path.exists());
    }
}

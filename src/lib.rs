pub mod descriptor;
pub mod install;
pub mod runtime;

/// Test utilities for cross-platform path handling.
#[cfg(test)]
pub mod test_utils {
    use std::path::PathBuf;

    /// Returns the test home directory path based on the platform.
    /// - Unix: `/home/user`
    /// - Windows: `C:\Users\user`
    pub fn test_home() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/user")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user")
        }
    }

    /// Returns the test bin directory used as an install target.
    /// - Unix: `/usr/local/bin`
    /// - Windows: `C:\Program Files\bin`
    pub fn test_bin_dir() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/usr/local/bin")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Program Files\bin")
        }
    }

    /// Returns the test source tree holding the manifest and its scripts.
    /// - Unix: `/src`
    /// - Windows: `C:\src`
    pub fn test_source_root() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/src")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\src")
        }
    }
}

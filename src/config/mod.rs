use std::path::PathBuf;

/// Location of the package database and its helpers.
///
/// There is no configuration file; binaries run with `Config::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpm: RpmConfig,
    /// Root of yum's per-package metadata store.
    pub yumdb_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpm: RpmConfig::default(),
            yumdb_path: PathBuf::from("/var/lib/yum/yumdb"),
        }
    }
}

/// How to invoke `rpm` for queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmConfig {
    /// Executable name or path.
    pub command: PathBuf,
    /// Passed as `--root` when set.
    pub root: Option<PathBuf>,
    /// Passed as `--dbpath` when set.
    pub dbpath: Option<PathBuf>,
}

impl Default for RpmConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("rpm"),
            root: None,
            dbpath: None,
        }
    }
}

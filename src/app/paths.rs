// SPDX-License-Identifier: MPL-2.0
//! Location of the thumbnail cache root and the configuration directory.
//!
//! Both are resolved through the same chain, first match wins:
//! 1. explicit override argument (tests, embedding hosts)
//! 2. `--cache-dir` / `--config-dir`, registered with [`init_cli_overrides`]
//! 3. `PLAYER_OVERLAY_CACHE_DIR` / `PLAYER_OVERLAY_CONFIG_DIR`
//! 4. the platform directory from `dirs`, joined with the application identity
//!
//! The last component of the cache root doubles as the cache namespace, so
//! two players started with different identities never share artifacts.
//!
//! ```ignore
//! paths::init_cli_overrides(flags.cache_dir, flags.config_dir);
//! let root = paths::cache_root(None, "MyPlayer");
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;

/// Default application identity.
pub const APP_NAME: &str = "PlayerOverlay";

pub const ENV_CACHE_DIR: &str = "PLAYER_OVERLAY_CACHE_DIR";
pub const ENV_CONFIG_DIR: &str = "PLAYER_OVERLAY_CONFIG_DIR";

static CLI_CACHE_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers directories given on the command line. Only the first call has
/// any effect.
pub fn init_cli_overrides(cache_dir: Option<String>, config_dir: Option<String>) {
    let _ = CLI_CACHE_DIR.set(cache_dir.map(PathBuf::from));
    let _ = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from));
}

/// Directory families handled by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Thumbnail artifacts.
    Cache,
    /// `settings.toml`.
    Config,
}

impl AppDir {
    fn env_var(self) -> &'static str {
        match self {
            Self::Cache => ENV_CACHE_DIR,
            Self::Config => ENV_CONFIG_DIR,
        }
    }

    fn cli_override(self) -> Option<PathBuf> {
        let cell = match self {
            Self::Cache => &CLI_CACHE_DIR,
            Self::Config => &CLI_CONFIG_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            Self::Cache => dirs::cache_dir(),
            Self::Config => dirs::config_dir(),
        }
    }
}

/// Walks the resolution chain for `dir`. `identity` only applies to the
/// platform default. Returns `None` when the platform has no such directory.
pub fn resolve(dir: AppDir, override_path: Option<PathBuf>, identity: &str) -> Option<PathBuf> {
    override_path
        .or_else(|| dir.cli_override())
        .or_else(|| {
            std::env::var(dir.env_var())
                .ok()
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| dir.platform_base().map(|base| base.join(identity)))
}

/// Thumbnail cache root, e.g. `~/.cache/<identity>` on Linux.
pub fn cache_root(override_path: Option<PathBuf>, identity: &str) -> Option<PathBuf> {
    resolve(AppDir::Cache, override_path, identity)
}

/// Directory holding `settings.toml`.
pub fn config_dir(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(AppDir::Config, override_path, APP_NAME)
}

// SPDX-License-Identifier: MPL-2.0
//! Where `locale.toml` and the preference store live.
//!
//! The first source that yields a directory wins:
//!
//! 1. an explicit `override_path` (tests, embedding hosts)
//! 2. `--config-dir`, registered once through [`init_cli_override`]
//! 3. a non-empty `LOCALE_SWITCH_CONFIG_DIR`
//! 4. `<platform config dir>/LocaleSwitch`

use std::path::PathBuf;
use std::sync::OnceLock;

const APP_NAME: &str = "LocaleSwitch";

/// Environment variable naming the config directory.
pub const ENV_CONFIG_DIR: &str = "LOCALE_SWITCH_CONFIG_DIR";

static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the `--config-dir` value. Only the first call takes effect;
/// later calls return `false`.
pub fn init_cli_override(config_dir: Option<String>) -> bool {
    CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok()
}

fn env_config_dir() -> Option<PathBuf> {
    std::env::var_os(ENV_CONFIG_DIR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn platform_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// The config directory, or `None` when the platform has none and no
/// override is set.
#[must_use]
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Like [`get_app_config_dir`], with `override_path` taking precedence over
/// every other source.
#[must_use]
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .or_else(|| CLI_CONFIG_DIR.get().cloned().flatten())
        .or_else(env_config_dir)
        .or_else(platform_config_dir)
}

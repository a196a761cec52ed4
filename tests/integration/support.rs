use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::TempDir;
use typefinder::tooling::cli::CliContext;

/// Serializes tests that touch process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const SITE_FIXTURE: &str = include_str!("../fixtures/site.yaml");

/// Run `f` with `XDG_CONFIG_HOME` pointing into `temp_dir`.
pub fn with_xdg_env<T>(temp_dir: &TempDir, f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock();
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().join("config"));
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Workspace directory holding the site fixture as `site.yaml`.
pub fn site_workspace(temp_dir: &TempDir) -> PathBuf {
    write_workspace(temp_dir, SITE_FIXTURE)
}

pub fn write_workspace(temp_dir: &TempDir, snapshot: &str) -> PathBuf {
    let workspace_root = temp_dir.path().join("workspace");
    fs::create_dir_all(&workspace_root).unwrap();
    fs::write(workspace_root.join("site.yaml"), snapshot).unwrap();
    workspace_root
}

pub fn context(workspace_root: &Path) -> CliContext {
    CliContext::new(workspace_root.to_path_buf(), None).unwrap()
}

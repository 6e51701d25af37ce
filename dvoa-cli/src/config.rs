//! Load config from file and environment.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;
use serde::Deserialize;

use crate::cli::Args;

/// Wrapper configuration. File: ~/.config/dvoacap/config.toml or /etc/dvoacap/config.toml.
/// Env overrides: DVOACAP_LIBRARY, DVOACAP_ENTRY_POINT, DVOACAP_CHECK_JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Shared library to load (default: platform name for `dvoa`, found via the loader search path).
    #[serde(default = "default_library")]
    pub library: PathBuf,
    /// Exported function to call (default `Predict`).
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    /// Reject non-JSON input before calling the library (default off).
    #[serde(default)]
    pub check_json: bool,
}

fn default_library() -> PathBuf {
    PathBuf::from(dvoa_core::default_library_name())
}
fn default_entry_point() -> String {
    dvoa_core::DEFAULT_ENTRY_POINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: default_library(),
            entry_point: default_entry_point(),
            check_json: false,
        }
    }
}

impl Config {
    /// Apply command-line flags, which take precedence over file and env.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(lib) = &args.library {
            self.library = lib.clone();
        }
        if let Some(entry) = &args.entry_point {
            self.entry_point = entry.clone();
        }
        if args.check_json {
            self.check_json = true;
        } else if args.no_check_json {
            self.check_json = false;
        }
    }
}

/// Load config: default, then config file, then env vars.
/// An explicit `path` must exist and parse; discovered files are best-effort.
pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    load_with(path, &config_paths(), |k| std::env::var(k).ok())
}

fn load_with(
    explicit: Option<&Path>,
    search: &[PathBuf],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let mut c = match explicit {
        Some(p) => read_file(p)?,
        None => discover(search).unwrap_or_default(),
    };
    if let Some(s) = env("DVOACAP_LIBRARY") {
        if !s.is_empty() {
            c.library = PathBuf::from(s);
        }
    }
    if let Some(s) = env("DVOACAP_ENTRY_POINT") {
        if !s.is_empty() {
            c.entry_point = s;
        }
    }
    if let Some(s) = env("DVOACAP_CHECK_JSON") {
        match parse_flag(&s) {
            Some(b) => c.check_json = b,
            None => warn!("ignoring DVOACAP_CHECK_JSON={:?}: expected a boolean", s),
        }
    }
    Ok(c)
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/dvoacap/config.toml"));
    }
    out.push(PathBuf::from("/etc/dvoacap/config.toml"));
    out
}

fn read_file(p: &Path) -> anyhow::Result<Config> {
    let s = std::fs::read_to_string(p)
        .with_context(|| format!("reading config {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parsing config {}", p.display()))
}

fn discover(search: &[PathBuf]) -> Option<Config> {
    let p = search.iter().find(|p| p.exists())?;
    match read_file(p) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("ignoring config: {:#}", e);
            None
        }
    }
}

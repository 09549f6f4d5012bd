use leptos::logging::warn;
use serde::Deserialize;
use thiserror::Error;

/// Matches the backend's `MAX_CONTENT_LENGTH` default.
pub(crate) const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;
pub(crate) const SIDEBAR_BREAKPOINT_PX: u32 = 991;
pub(crate) const MIN_QUERY_CHARS: usize = 2;
pub(crate) const MAX_SEARCH_RESULTS: usize = 10;

/// When the search index is (re)built from the sidebar links.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum IndexMode {
    /// Once, at init. Later sidebar mutations are not seen.
    #[default]
    Eager,
    /// On every input event, from the live DOM.
    Lazy,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("window.ENV is not serializable")]
    NotSerializable,
    #[error("invalid window.ENV: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw `window.ENV` shape. Both `MAX_UPLOAD_BYTES` and `max_upload_bytes`
/// spellings are accepted, same for the other keys.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct RawEnv {
    #[serde(rename = "MAX_UPLOAD_BYTES", alias = "max_upload_bytes")]
    max_upload_bytes: Option<u64>,
    #[serde(rename = "SEARCH_INDEX", alias = "search_index")]
    search_index: Option<IndexMode>,
    #[serde(rename = "UPLOAD_EXTENSIONS", alias = "upload_extensions")]
    upload_extensions: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DashboardConfig {
    pub max_upload_bytes: u64,
    /// Lower-cased, without dots. Empty accepts everything.
    pub upload_extensions: Vec<String>,
    pub index_mode: IndexMode,
    pub sidebar_breakpoint_px: u32,
    pub min_query_chars: usize,
    pub max_search_results: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upload_extensions: Vec::new(),
            index_mode: IndexMode::Eager,
            sidebar_breakpoint_px: SIDEBAR_BREAKPOINT_PX,
            min_query_chars: MIN_QUERY_CHARS,
            max_search_results: MAX_SEARCH_RESULTS,
        }
    }
}

impl DashboardConfig {
    /// Reads `window.ENV`. Missing or malformed config falls back to the
    /// defaults; the page keeps working either way.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let Some(env) = window.get("ENV") else {
            return Self::default();
        };
        if env.is_undefined() || !env.is_object() {
            return Self::default();
        }

        let parsed = js_sys::JSON::stringify(&env)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or(ConfigError::NotSerializable)
            .and_then(|json| Self::from_json(&json));

        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!("sioc: {e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawEnv = serde_json::from_str(json)?;
        let mut config = Self::default();

        if let Some(max) = raw.max_upload_bytes.filter(|m| *m > 0) {
            config.max_upload_bytes = max;
        }
        if let Some(mode) = raw.search_index {
            config.index_mode = mode;
        }
        if let Some(exts) = raw.upload_extensions {
            config.upload_extensions = exts
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
        }

        Ok(config)
    }
}

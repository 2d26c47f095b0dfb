use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub catalog: Option<CatalogConfig>,
    pub recommendations: Option<RecommendationsConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,
    /// 0 disables the per-request timeout.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub page_size: Option<u32>,
    pub search_debounce_ms: Option<u64>,
    pub first_year: Option<u16>,
    pub last_year: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsConfig {
    pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/movierec/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("movierec").join("config.toml"))
}

/// Load config by cascading CWD `.movierec.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".movierec.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_api = base.api.unwrap_or_default();
    let over_api = overlay.api.unwrap_or_default();
    let base_catalog = base.catalog.unwrap_or_default();
    let over_catalog = overlay.catalog.unwrap_or_default();
    let base_recs = base.recommendations.unwrap_or_default();
    let over_recs = overlay.recommendations.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let over_display = overlay.display.unwrap_or_default();

    ConfigFile {
        api: Some(ApiConfig {
            url: over_api.url.or(base_api.url),
            timeout_secs: over_api.timeout_secs.or(base_api.timeout_secs),
        }),
        catalog: Some(CatalogConfig {
            page_size: over_catalog.page_size.or(base_catalog.page_size),
            search_debounce_ms: over_catalog
                .search_debounce_ms
                .or(base_catalog.search_debounce_ms),
            first_year: over_catalog.first_year.or(base_catalog.first_year),
            last_year: over_catalog.last_year.or(base_catalog.last_year),
        }),
        recommendations: Some(RecommendationsConfig {
            top_k: over_recs.top_k.or(base_recs.top_k),
        }),
        display: Some(DisplayConfig {
            theme: over_display.theme.or(base_display.theme),
        }),
    }
}

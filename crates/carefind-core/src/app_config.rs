use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub geocode_timeout_secs: u64,
    pub facility_timeout_secs: u64,
    pub facility_max_retries: u32,
    pub facility_backoff_base_ms: u64,
    pub search_radius_m: f64,
    pub suggestion_limit: usize,
    pub debounce_ms: u64,
    pub gazetteer_path: PathBuf,
    pub fallback_facilities_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("nominatim_url", &self.nominatim_url)
            .field("overpass_url", &self.overpass_url)
            .field("user_agent", &self.user_agent)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("facility_timeout_secs", &self.facility_timeout_secs)
            .field("facility_max_retries", &self.facility_max_retries)
            .field("facility_backoff_base_ms", &self.facility_backoff_base_ms)
            .field("search_radius_m", &self.search_radius_m)
            .field("suggestion_limit", &self.suggestion_limit)
            .field("debounce_ms", &self.debounce_ms)
            .field("gazetteer_path", &self.gazetteer_path)
            .field("fallback_facilities_path", &self.fallback_facilities_path)
            .finish()
    }
}

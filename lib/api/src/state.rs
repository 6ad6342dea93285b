use resrec_catalog::{Catalog, DEFAULT_LIMIT};
use resrec_core::Predictor;

/// Listener and response settings of the REST API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Restaurants returned per recommendation
    pub recommend_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            recommend_limit: DEFAULT_LIMIT,
        }
    }
}

/// Read-only state shared by every worker
#[derive(Debug)]
pub struct AppState {
    pub predictor: Predictor,
    pub catalog: Option<Catalog>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(predictor: Predictor, catalog: Option<Catalog>, config: ApiConfig) -> Self {
        Self {
            predictor,
            catalog,
            config,
        }
    }
}

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
    /// Base URL of the OpenAI-compatible completion service.
    pub completion_base_url: String,
    pub completion_api_key: String,
    pub completion_model: String,
    pub request_timeout_secs: u64,
    /// Cap on how many catalog products are embedded in the prompt.
    pub max_catalog_items: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_api_key", &"[redacted]")
            .field("completion_model", &self.completion_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_catalog_items", &self.max_catalog_items)
            .finish()
    }
}

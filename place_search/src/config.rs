use secrecy::Secret;
use serde::Deserialize;

/// Settings for the external geocoding endpoint. Loaded from the
/// `configuration/` directory by the host, or built directly and injected
/// where a non-default endpoint is needed (tests, staging).
#[derive(Clone, Debug, Deserialize)]
pub struct GeocodingSettings {
    pub host: String,
    pub api_key: Secret<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_country() -> String {
    "ar".to_owned()
}

fn default_limit() -> usize {
    5
}

#[derive(Deserialize)]
struct Settings {
    geocoding: GeocodingSettings,
}

impl GeocodingSettings {
    pub fn load() -> anyhow::Result<Self> {
        shared_kernel::configuration::config::<Settings>().map(|settings| settings.geocoding)
    }
}

use secrecy::Secret;
use serde::Deserialize;

/// Settings for the external directions endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct DirectionsSettings {
    pub host: String,
    pub api_key: Secret<String>,
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_profile() -> String {
    "driving".to_owned()
}

#[derive(Deserialize)]
struct Settings {
    directions: DirectionsSettings,
}

impl DirectionsSettings {
    pub fn load() -> anyhow::Result<Self> {
        shared_kernel::configuration::config::<Settings>().map(|settings| settings.directions)
    }
}

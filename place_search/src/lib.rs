pub mod config;

use anyhow::{anyhow, Context};
use entities::places::PlaceCandidate;
use secrecy::ExposeSecret;
use shared_kernel::http_client::HttpClient;
use url::Url;

use crate::config::GeocodingSettings;

/// Queries shorter than this never leave the process.
const MIN_QUERY_CHARS: usize = 3;

pub struct PlaceSearcher {
    settings: GeocodingSettings,
}

impl PlaceSearcher {
    pub fn new(settings: GeocodingSettings) -> Self {
        PlaceSearcher { settings }
    }

    /// Best-effort address suggestions for a partially typed query.
    ///
    /// Suggestion lookup is an affordance, not a required step, so every
    /// failure mode (network, service error, malformed payload) resolves to
    /// an empty list and is only logged.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn suggestions(&self, query: &str) -> Vec<PlaceCandidate> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        match self.fetch_candidates(query).await {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::warn!(?error, query, "address suggestion lookup failed");
                Vec::new()
            }
        }
    }

    async fn fetch_candidates(&self, query: &str) -> anyhow::Result<Vec<PlaceCandidate>> {
        let url = self.search_url(query)?;
        let response = HttpClient::get_json::<schema::GeocodingResponse>(url).await?;
        Ok(response
            .features
            .into_iter()
            .filter_map(schema::Feature::into_candidate)
            .take(self.settings.limit)
            .collect())
    }

    fn search_url(&self, query: &str) -> anyhow::Result<Url> {
        let mut url =
            Url::parse(&self.settings.host).context("Failed to parse the geocoding host")?;
        // The query goes in as one percent-encoded path segment; free-form
        // address text can contain `#`, `?` or `/`.
        url.path_segments_mut()
            .map_err(|()| anyhow!("The geocoding host cannot be a base url"))?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places"])
            .push(&format!("{query}.json"));
        url.query_pairs_mut()
            .append_pair("access_token", self.settings.api_key.expose_secret())
            .append_pair("country", &self.settings.country)
            .append_pair("limit", &self.settings.limit.to_string());
        Ok(url)
    }
}

mod schema {
    use entities::coordinates::Coordinates;
    use entities::places::{ExternalPlaceId, PlaceCandidate};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub(crate) struct GeocodingResponse {
        #[serde(default)]
        pub features: Vec<Feature>,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct Feature {
        pub id: Option<String>,
        pub place_name: Option<String>,
        pub geometry: Option<Geometry>,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct Geometry {
        #[serde(default)]
        pub coordinates: Vec<f64>,
    }

    impl Feature {
        /// A feature missing its id, display name or coordinate pair is
        /// unusable as a suggestion and gets dropped rather than surfaced.
        pub(crate) fn into_candidate(self) -> Option<PlaceCandidate> {
            let id = self.id?;
            let display_name = self.place_name?;
            let coordinates = self.geometry?.coordinates;
            let longitude = *coordinates.first()?;
            let latitude = *coordinates.get(1)?;
            Some(PlaceCandidate {
                id: ExternalPlaceId::from(id),
                display_name,
                coordinates: Coordinates {
                    longitude,
                    latitude,
                },
            })
        }
    }
}

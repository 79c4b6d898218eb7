pub mod config;

use anyhow::Context;
use entities::coordinates::Coordinates;
use secrecy::ExposeSecret;
use shared_kernel::http_client::HttpClient;
use thiserror::Error;
use url::Url;

use crate::config::DirectionsSettings;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("both origin and destination coordinates are required")]
    MissingCoordinates,
    #[error("no driving route exists between the selected points")]
    NoRouteFound,
    #[error("the directions service could not be reached")]
    ServiceUnavailable(#[source] anyhow::Error),
}

/// Distance and path for one origin-destination pair. Ephemeral: derived
/// from exactly one request and recomputed on every calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct DrivingRoute {
    pub distance_meters: f64,
    pub geometry: Vec<Coordinates>,
}

impl DrivingRoute {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}

pub struct RouteClient {
    settings: DirectionsSettings,
}

impl RouteClient {
    pub fn new(settings: DirectionsSettings) -> Self {
        RouteClient { settings }
    }

    /// Fetches the default driving route between two selected points.
    ///
    /// Unlike suggestion lookup, a missing route is a hard failure: the
    /// profitability workflow cannot proceed without a distance, so every
    /// error variant here surfaces to the caller.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn driving_route(
        &self,
        origin: Option<Coordinates>,
        destination: Option<Coordinates>,
    ) -> Result<DrivingRoute, RouteError> {
        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return Err(RouteError::MissingCoordinates),
        };

        let url = self
            .route_url(origin, destination)
            .map_err(RouteError::ServiceUnavailable)?;
        let response = HttpClient::get_json::<schema::DirectionsResponse>(url)
            .await
            .map_err(RouteError::ServiceUnavailable)?;

        // The service orders alternatives by its own preference; we always
        // take the first one and do no scoring of our own.
        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(RouteError::NoRouteFound)?;
        route
            .into_driving_route()
            .map_err(RouteError::ServiceUnavailable)
    }

    fn route_url(&self, origin: Coordinates, destination: Coordinates) -> anyhow::Result<Url> {
        let host_with_path = format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.settings.host,
            self.settings.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );
        Url::parse_with_params(
            &host_with_path,
            &[
                ("access_token", self.settings.api_key.expose_secret().as_str()),
                ("geometries", "geojson"),
                ("overview", "full"),
            ],
        )
        .context("Failed to build the directions url")
    }
}

mod schema {
    use anyhow::anyhow;
    use entities::coordinates::Coordinates;
    use serde::Deserialize;

    use crate::DrivingRoute;

    #[derive(Debug, Deserialize)]
    pub(crate) struct DirectionsResponse {
        #[serde(default)]
        pub routes: Vec<Route>,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct Route {
        pub distance: f64,
        pub geometry: Geometry,
    }

    #[derive(Debug, Deserialize)]
    pub(crate) struct Geometry {
        #[serde(default)]
        pub coordinates: Vec<[f64; 2]>,
    }

    impl Route {
        pub(crate) fn into_driving_route(self) -> anyhow::Result<DrivingRoute> {
            if !self.distance.is_finite() || self.distance < 0.0 {
                return Err(anyhow!(
                    "directions response carried an invalid distance: {}",
                    self.distance
                ));
            }
            Ok(DrivingRoute {
                distance_meters: self.distance,
                geometry: self
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[longitude, latitude]| Coordinates {
                        longitude,
                        latitude,
                    })
                    .collect(),
            })
        }
    }
}

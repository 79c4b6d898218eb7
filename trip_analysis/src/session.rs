use std::sync::Arc;

use directions::{RouteClient, RouteError};
use entities::coordinates::Coordinates;
use entities::drivers::DriverId;
use entities::places::PlaceCandidate;
use entities::trips::NewTripRecord;
use place_search::PlaceSearcher;
use profitability::InvalidInput;
use thiserror::Error;

use crate::data_transfer::{CompletedAnalysis, Notification};
use crate::events::{EventPublisher, TripEvent};
use crate::store::TripStore;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),
    #[error("no route could be found between the selected addresses")]
    RouteUnavailable,
    #[error("could not reach the directions service, check your connection")]
    ServiceUnavailable(#[source] anyhow::Error),
    #[error("the analysis could not be saved")]
    Persistence(#[source] anyhow::Error),
}

/// Issued by [`SuggestionField::begin_edit`]; a lookup result is only
/// applied if its ticket is still the newest one for the field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryTicket(u64);

/// One address input with its suggestion list and, once the user picks a
/// suggestion, the selected coordinates.
///
/// Invariant: `selected_coordinates` is `None` whenever the text has been
/// edited since the last selection, so stale coordinates can never be
/// submitted behind mismatched display text.
#[derive(Debug, Default)]
pub struct SuggestionField {
    text: String,
    selected_coordinates: Option<Coordinates>,
    suggestions: Vec<PlaceCandidate>,
    sequence: u64,
}

impl SuggestionField {
    /// Records a text edit. Any previous selection is invalidated, and any
    /// lookup still in flight is superseded by the returned ticket.
    pub fn begin_edit(&mut self, text: String) -> QueryTicket {
        self.text = text;
        self.selected_coordinates = None;
        self.suggestions.clear();
        self.sequence += 1;
        QueryTicket(self.sequence)
    }

    /// Applies lookup results, unless a newer edit or selection already
    /// superseded the ticket; stale results are dropped on the floor.
    pub fn apply_results(&mut self, ticket: QueryTicket, results: Vec<PlaceCandidate>) {
        if ticket.0 == self.sequence {
            self.suggestions = results;
        }
    }

    pub fn select(&mut self, candidate: PlaceCandidate) {
        self.text = candidate.display_name;
        self.selected_coordinates = Some(candidate.coordinates);
        self.suggestions.clear();
        // A selection also supersedes any lookup still in flight.
        self.sequence += 1;
    }

    fn reset(&mut self) {
        self.text.clear();
        self.selected_coordinates = None;
        self.suggestions.clear();
        self.sequence += 1;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected_coordinates(&self) -> Option<Coordinates> {
        self.selected_coordinates
    }

    pub fn suggestions(&self) -> &[PlaceCandidate] {
        &self.suggestions
    }
}

#[derive(Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Calculating,
    Ready(CompletedAnalysis),
    Failed,
}

/// The stateful orchestrator behind the trip screen: address resolution,
/// route fetch, profitability evaluation and the persistence handoff.
///
/// One session per active screen and user; operations take `&mut self`, so
/// there is never concurrent mutation to guard against beyond the
/// suggestion tickets.
pub struct TripAnalysisSession {
    driver: DriverId,
    searcher: PlaceSearcher,
    routes: RouteClient,
    store: Arc<dyn TripStore>,
    events: EventPublisher,
    origin: SuggestionField,
    destination: SuggestionField,
    desired_price_per_km: String,
    trip_price: String,
    phase: Phase,
    notification: Option<Notification>,
}

impl TripAnalysisSession {
    pub fn new(
        driver: DriverId,
        searcher: PlaceSearcher,
        routes: RouteClient,
        store: Arc<dyn TripStore>,
        events: EventPublisher,
    ) -> Self {
        TripAnalysisSession {
            driver,
            searcher,
            routes,
            store,
            events,
            origin: SuggestionField::default(),
            destination: SuggestionField::default(),
            desired_price_per_km: String::new(),
            trip_price: String::new(),
            phase: Phase::default(),
            notification: None,
        }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn edit_origin(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.dismiss_transient_state();
        let ticket = self.origin.begin_edit(text.clone());
        let results = self.searcher.suggestions(&text).await;
        self.origin.apply_results(ticket, results);
    }

    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn edit_destination(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.dismiss_transient_state();
        let ticket = self.destination.begin_edit(text.clone());
        let results = self.searcher.suggestions(&text).await;
        self.destination.apply_results(ticket, results);
    }

    pub fn select_origin(&mut self, candidate: PlaceCandidate) {
        self.dismiss_transient_state();
        self.origin.select(candidate);
    }

    pub fn select_destination(&mut self, candidate: PlaceCandidate) {
        self.dismiss_transient_state();
        self.destination.select(candidate);
    }

    pub fn edit_desired_price_per_km(&mut self, text: impl Into<String>) {
        self.dismiss_transient_state();
        self.desired_price_per_km = text.into();
    }

    pub fn edit_trip_price(&mut self, text: impl Into<String>) {
        self.dismiss_transient_state();
        self.trip_price = text.into();
    }

    /// Validates the form, fetches the route and evaluates the economics.
    ///
    /// Validation failures never reach the network. The calculator runs
    /// strictly after the route resolves since it needs the distance. A
    /// failure leaves no partial analysis behind; a success replaces any
    /// previous result wholesale.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn calculate(&mut self) -> Result<(), SessionError> {
        let inputs = match self.validated_inputs() {
            Ok(inputs) => inputs,
            Err(error) => {
                self.notification = Some(Notification::error(error.to_string()));
                return Err(error);
            }
        };

        self.phase = Phase::Calculating;
        match self.run_calculation(inputs).await {
            Ok(completed) => {
                self.notification = None;
                self.phase = Phase::Ready(completed);
                Ok(())
            }
            Err(error) => {
                self.phase = Phase::Failed;
                self.notification = Some(Notification::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Hands the current analysis to the persistence collaborator. Only
    /// available in `Ready`; a store failure keeps the analysis so the user
    /// can retry saving without recomputing the route.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn save(&mut self) -> Result<(), SessionError> {
        let record = match &self.phase {
            Phase::Ready(completed) => NewTripRecord {
                driver: self.driver,
                origin: completed.origin.clone(),
                destination: completed.destination.clone(),
                distance_km: completed.analysis.distance_km,
                trip_price: completed.trip_price,
                desired_price_per_km: completed.desired_price_per_km,
                actual_price_per_km: completed.analysis.actual_price_per_km,
                profitability: completed.analysis.tier,
            },
            _ => {
                let error =
                    SessionError::Validation("calculate an analysis before saving".to_owned());
                self.notification = Some(Notification::error(error.to_string()));
                return Err(error);
            }
        };

        match self.store.save_analysis(record).await {
            Ok(()) => {
                self.events.publish(TripEvent::AnalysisSaved {
                    driver: self.driver,
                });
                self.reset_all();
                self.notification = Some(Notification::success("analysis saved"));
                Ok(())
            }
            Err(cause) => {
                let error = SessionError::Persistence(cause);
                self.notification = Some(Notification::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Returns every piece of session state to its initial empty value,
    /// from any phase.
    pub fn clear(&mut self) {
        self.reset_all();
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn analysis(&self) -> Option<&CompletedAnalysis> {
        match &self.phase {
            Phase::Ready(completed) => Some(completed),
            _ => None,
        }
    }

    pub fn can_save(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn origin(&self) -> &SuggestionField {
        &self.origin
    }

    pub fn destination(&self) -> &SuggestionField {
        &self.destination
    }

    pub fn desired_price_per_km(&self) -> &str {
        &self.desired_price_per_km
    }

    pub fn trip_price(&self) -> &str {
        &self.trip_price
    }

    /// Any user input dismisses the latest notification, and a failed
    /// calculation goes back to `Idle` once the user starts correcting the
    /// form. A `Ready` analysis survives edits; it is only discarded by the
    /// next calculation or a reset.
    fn dismiss_transient_state(&mut self) {
        self.notification = None;
        if self.phase == Phase::Failed {
            self.phase = Phase::Idle;
        }
    }

    fn validated_inputs(&self) -> Result<CalculationInputs, SessionError> {
        let origin = self.origin.selected_coordinates().ok_or_else(|| {
            SessionError::Validation("select an origin address from the suggestions".to_owned())
        })?;
        let destination = self.destination.selected_coordinates().ok_or_else(|| {
            SessionError::Validation(
                "select a destination address from the suggestions".to_owned(),
            )
        })?;
        let trip_price = parse_positive_amount(&self.trip_price, "trip price")?;
        let desired_price_per_km =
            parse_positive_amount(&self.desired_price_per_km, "desired price per km")?;
        Ok(CalculationInputs {
            origin,
            destination,
            trip_price,
            desired_price_per_km,
        })
    }

    async fn run_calculation(
        &self,
        inputs: CalculationInputs,
    ) -> Result<CompletedAnalysis, SessionError> {
        let route = self
            .routes
            .driving_route(Some(inputs.origin), Some(inputs.destination))
            .await
            .map_err(|error| match error {
                RouteError::MissingCoordinates => SessionError::Validation(error.to_string()),
                RouteError::NoRouteFound => SessionError::RouteUnavailable,
                RouteError::ServiceUnavailable(cause) => SessionError::ServiceUnavailable(cause),
            })?;

        let analysis = profitability::evaluate(
            route.distance_km(),
            inputs.trip_price,
            inputs.desired_price_per_km,
        )
        .map_err(|error| match error {
            // A degenerate route (zero distance) is a routing problem from
            // the user's point of view; prices were validated up front.
            InvalidInput::Distance(_) => SessionError::RouteUnavailable,
            other => SessionError::Validation(other.to_string()),
        })?;

        Ok(CompletedAnalysis {
            // At this point both fields hold the display names of the
            // selected candidates; validation rejects edited text.
            origin: self.origin.text().to_owned(),
            destination: self.destination.text().to_owned(),
            analysis,
            trip_price: inputs.trip_price,
            desired_price_per_km: inputs.desired_price_per_km,
            geometry: route.geometry,
        })
    }

    fn reset_all(&mut self) {
        self.origin.reset();
        self.destination.reset();
        self.desired_price_per_km.clear();
        self.trip_price.clear();
        self.phase = Phase::Idle;
        self.notification = None;
    }
}

struct CalculationInputs {
    origin: Coordinates,
    destination: Coordinates,
    trip_price: f64,
    desired_price_per_km: f64,
}

fn parse_positive_amount(raw: &str, field: &str) -> Result<f64, SessionError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| SessionError::Validation(format!("enter a valid {field}")))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SessionError::Validation(format!(
            "{field} must be greater than zero"
        )))
    }
}

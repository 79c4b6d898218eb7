use crate::coordinates::Coordinates;
use shared_kernel::string_key;

string_key!(ExternalPlaceId);

/// One geocoded address suggestion. Produced fresh per query and never
/// persisted; the id is only unique within the result list it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceCandidate {
    pub id: ExternalPlaceId,
    pub display_name: String,
    pub coordinates: Coordinates,
}

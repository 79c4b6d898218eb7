use crate::drivers::DriverId;
use serde::{Deserialize, Serialize};

/// Classification of a trip's real per-km price against the driver's
/// target. The storage encoding matches the values the history screens
/// query by.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitabilityTier {
    Rentable,
    PocoRentable,
    NoRentable,
}

impl ProfitabilityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfitabilityTier::Rentable => "rentable",
            ProfitabilityTier::PocoRentable => "poco_rentable",
            ProfitabilityTier::NoRentable => "no_rentable",
        }
    }
}

impl std::fmt::Display for ProfitabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished trip analysis in the shape the persistence collaborator
/// accepts, keyed by the driver it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTripRecord {
    pub driver: DriverId,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub trip_price: f64,
    pub desired_price_per_km: f64,
    pub actual_price_per_km: f64,
    pub profitability: ProfitabilityTier,
}

#[cfg(test)]
mod tests {
    use super::ProfitabilityTier;

    #[test]
    fn tier_storage_encoding_is_lowercase_snake_case() {
        assert_eq!(
            serde_json::to_value(ProfitabilityTier::Rentable).unwrap(),
            "rentable"
        );
        assert_eq!(
            serde_json::to_value(ProfitabilityTier::PocoRentable).unwrap(),
            "poco_rentable"
        );
        assert_eq!(
            serde_json::to_value(ProfitabilityTier::NoRentable).unwrap(),
            "no_rentable"
        );
    }
}

use entities::trips::ProfitabilityTier;
use thiserror::Error;

/// A trip is worth taking once the real per-km price clears the target by
/// this margin (percent). Both boundaries are inclusive toward the more
/// lenient tier.
const RENTABLE_AT_OR_ABOVE: f64 = 10.0;
const NO_RENTABLE_BELOW: f64 = -10.0;

#[derive(Error, Clone, Debug, PartialEq)]
pub enum InvalidInput {
    #[error("distance must be a positive number of kilometres, got {0}")]
    Distance(f64),
    #[error("trip price must be a positive amount, got {0}")]
    TripPrice(f64),
    #[error("desired price per kilometre must be a positive amount, got {0}")]
    DesiredPricePerKm(f64),
}

/// The economics of one trip, derived entirely from a route distance and
/// two user-entered prices. Never mutated in place; a recalculation
/// produces a fresh value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfitabilityAnalysis {
    pub distance_km: f64,
    pub actual_price_per_km: f64,
    pub percent_difference: f64,
    pub tier: ProfitabilityTier,
}

impl ProfitabilityAnalysis {
    /// Currency figure for display. Rounding happens here and only here;
    /// the tier is always classified on the unrounded value.
    pub fn display_price_per_km(&self) -> String {
        format!("{:.2}", self.actual_price_per_km)
    }

    pub fn display_distance_km(&self) -> String {
        format!("{:.2}", self.distance_km)
    }

    pub fn display_percent_difference(&self) -> String {
        if self.percent_difference > 0.0 {
            format!("+{:.1}%", self.percent_difference)
        } else {
            format!("{:.1}%", self.percent_difference)
        }
    }
}

/// Pure function: no I/O, no rounding, identical inputs always produce
/// bit-identical outputs.
pub fn evaluate(
    distance_km: f64,
    trip_price: f64,
    desired_price_per_km: f64,
) -> Result<ProfitabilityAnalysis, InvalidInput> {
    if !(distance_km.is_finite() && distance_km > 0.0) {
        return Err(InvalidInput::Distance(distance_km));
    }
    if !(trip_price.is_finite() && trip_price > 0.0) {
        return Err(InvalidInput::TripPrice(trip_price));
    }
    if !(desired_price_per_km.is_finite() && desired_price_per_km > 0.0) {
        return Err(InvalidInput::DesiredPricePerKm(desired_price_per_km));
    }

    let actual_price_per_km = trip_price / distance_km;
    let percent_difference =
        (actual_price_per_km - desired_price_per_km) / desired_price_per_km * 100.0;

    Ok(ProfitabilityAnalysis {
        distance_km,
        actual_price_per_km,
        percent_difference,
        tier: classify(percent_difference),
    })
}

fn classify(percent_difference: f64) -> ProfitabilityTier {
    if percent_difference >= RENTABLE_AT_OR_ABOVE {
        ProfitabilityTier::Rentable
    } else if percent_difference >= NO_RENTABLE_BELOW {
        ProfitabilityTier::PocoRentable
    } else {
        ProfitabilityTier::NoRentable
    }
}

//! Unit conversion within a dimension

use carbontrace_domain::Unit;

/// Kilometres in one statute mile
pub const KM_PER_MILE: f64 = 1.60934;

/// Grams in one kilogram
pub const G_PER_KG: f64 = 1000.0;

/// Convert `quantity` from one unit into another
///
/// Returns `None` when the units belong to different dimensions (e.g.
/// `hour` and `kwh`, or `serving` and `kg`); there is no meaningful
/// conversion between them.
pub fn convert(quantity: f64, from: Unit, to: Unit) -> Option<f64> {
    if from == to {
        return Some(quantity);
    }

    match (from, to) {
        (Unit::G, Unit::Kg) => Some(quantity / G_PER_KG),
        (Unit::Kg, Unit::G) => Some(quantity * G_PER_KG),
        (Unit::Mile, Unit::Km) => Some(quantity * KM_PER_MILE),
        (Unit::Km, Unit::Mile) => Some(quantity / KM_PER_MILE),
        _ => None,
    }
}

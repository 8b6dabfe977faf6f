use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const ASSUMPTIONS: &str = "Estimated using NEC-based commercial rules.";

const WIRE_FEET_PER_OUTLET: f64 = 50.0;

// Labor rates (hours per unit)
const HOURS_PER_OUTLET: f64 = 0.5;
const HOURS_PER_FIXTURE: f64 = 0.75;
const HOURS_PER_SWITCH: f64 = 0.3;
const HOURS_PER_PANEL: f64 = 8.0;
const CONDUIT_FEET_PER_HOUR: f64 = 20.0;

/// Quantities submitted to `/generate-estimate`.
///
/// Every field is optional and lenient: anything that is not a number
/// (or a string holding one) counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRequest {
    /// Accepted but not used by any rule yet.
    #[serde(deserialize_with = "lenient_number")]
    pub square_feet: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub outlet_count: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub lighting_fixture_count: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub switch_count: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub panel_count: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub emt_conduit_feet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Each,
    Feet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLineItem {
    pub name: &'static str,
    #[serde(serialize_with = "compact_number")]
    pub quantity: f64,
    pub unit: Unit,
}

impl MaterialLineItem {
    fn new(name: &'static str, quantity: f64, unit: Unit) -> Self {
        Self { name, quantity, unit }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub materials: Vec<MaterialLineItem>,
    pub labor_hours: f64,
    pub assumptions: &'static str,
}

/// Build the bill of materials and labor figure for a request.
pub fn generate_estimate(request: &EstimateRequest) -> EstimateResponse {
    let materials = vec![
        MaterialLineItem::new("Duplex outlet", request.outlet_count, Unit::Each),
        MaterialLineItem::new("Lighting fixture", request.lighting_fixture_count, Unit::Each),
        MaterialLineItem::new("Single pole switch", request.switch_count, Unit::Each),
        MaterialLineItem::new("Electrical panel", request.panel_count, Unit::Each),
        MaterialLineItem::new("EMT conduit", request.emt_conduit_feet, Unit::Feet),
        MaterialLineItem::new(
            "12AWG THHN wire",
            request.outlet_count * WIRE_FEET_PER_OUTLET,
            Unit::Feet,
        ),
    ];

    let labor_hours = request.outlet_count * HOURS_PER_OUTLET
        + request.lighting_fixture_count * HOURS_PER_FIXTURE
        + request.switch_count * HOURS_PER_SWITCH
        + request.panel_count * HOURS_PER_PANEL
        + request.emt_conduit_feet / CONDUIT_FEET_PER_HOUR;

    EstimateResponse {
        materials,
        labor_hours: round_tenths(labor_hours),
        assumptions: ASSUMPTIONS,
    }
}

/// Round to one decimal place, ties to even.
///
/// The value is snapped to 1e-9 tenths first so that sums like
/// `11.15 + 8 + 5` land on the tie they represent in decimal. Past
/// `SNAP_LIMIT` tenths an f64 has no fractional digits left to snap.
pub fn round_tenths(value: f64) -> f64 {
    const SNAP_LIMIT: f64 = 1e15;

    let tenths = value * 10.0;
    let snapped = if tenths.abs() > SNAP_LIMIT {
        tenths
    } else {
        (tenths * 1e9).round() / 1e9
    };
    let rounded = snapped.round_ties_even() / 10.0;
    // Avoid emitting -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(number)
}

// Integral quantities go out as JSON integers, the way they came in
fn compact_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

use std::str::FromStr;

use crate::domain::scenario::edge_bias::edge_index;
use crate::domain::utils::id::EdgeId;
use crate::error::ConversionError;

/// How many vehicles a scenario tries to place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetCount {
    Fixed(usize),
    /// `floor(fraction * total capacity)`.
    FractionOfCapacity(f64),
    /// Uniform integer in `[floor(min * total), floor(max * total)]`, drawn per run.
    RandomFractionRange { min: f64, max: f64 },
}

/// Which vehicles leave their parking area first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOrder {
    LowestEdgeFirst,
    HighestEdgeFirst,
}

impl FromStr for ExitOrder {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<ExitOrder, Self::Err> {
        match s {
            "lowest-edge-first" | "ascending" => Ok(ExitOrder::LowestEdgeFirst),
            "highest-edge-first" | "descending" => Ok(ExitOrder::HighestEdgeFirst),
            _ => Err(ConversionError::UnknownExitOrder(s.to_string())),
        }
    }
}

/// Scale (mean) of the exponential gap drawn between consecutive exits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapScale {
    Constant(f64),
    /// `base + slope * n` where `n` is the entry edge index.
    EdgeLinear { base: f64, slope: f64 },
}

impl GapScale {
    pub fn scale_for(&self, entry_edge: &EdgeId) -> f64 {
        match *self {
            GapScale::Constant(scale) => scale,
            GapScale::EdgeLinear { base, slope } => base + slope * edge_index(entry_edge) as f64,
        }
    }
}

/// How the stop duration of each vehicle is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopDurationStrategy {
    /// Park until the vehicle's slot in the synchronized exit sequence.
    SynchronizedExit,
    /// Park for a duration drawn uniformly from `[min, max]`.
    IndependentUniform { min: f64, max: f64 },
}

impl StopDurationStrategy {
    pub fn from_name(name: &str, uniform_min: f64, uniform_max: f64) -> Result<Self, ConversionError> {
        match name {
            "SynchronizedExit" | "synchronized-exit" => Ok(StopDurationStrategy::SynchronizedExit),
            "IndependentUniform" | "independent-uniform" => Ok(StopDurationStrategy::IndependentUniform { min: uniform_min, max: uniform_max }),
            _ => Err(ConversionError::UnknownDurationStrategy(name.to_string())),
        }
    }
}

/// Which part of the route counts toward the estimated travel time to the parking area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelTimeBasis {
    FullRoute,
    ToEntryEdge,
}

impl FromStr for TravelTimeBasis {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<TravelTimeBasis, Self::Err> {
        match s {
            "FullRoute" | "full-route" => Ok(TravelTimeBasis::FullRoute),
            "ToEntryEdge" | "to-entry-edge" => Ok(TravelTimeBasis::ToEntryEdge),
            _ => Err(ConversionError::UnknownTravelTimeBasis(s.to_string())),
        }
    }
}

/// How an entry edge is drawn inside the chosen parking area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEdgeSelection {
    /// Edges already used by the area are skipped until every edge has been used once.
    SpreadFirst,
    /// Every draw considers all of the area's edges.
    WithReplacement,
}

impl FromStr for EntryEdgeSelection {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<EntryEdgeSelection, Self::Err> {
        match s {
            "SpreadFirst" | "spread-first" => Ok(EntryEdgeSelection::SpreadFirst),
            "WithReplacement" | "with-replacement" => Ok(EntryEdgeSelection::WithReplacement),
            _ => Err(ConversionError::InvalidValue { field: "entryEdgeSelection", reason: format!("unknown selection '{}'", s) }),
        }
    }
}

/// Parameters of the scenario generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub target_count: TargetCount,
    /// Signed λ in `exp(λ · n)`; negative favors low-numbered entry edges.
    pub edge_bias: f64,
    pub entry_edge_selection: EntryEdgeSelection,
    pub departure_mean: f64,
    pub departure_spread: f64,
    /// Distance units per time unit used for travel time estimates.
    pub reference_speed: f64,
    pub travel_time_basis: TravelTimeBasis,
    /// Added to the latest estimated arrival to obtain the synchronization anchor.
    pub anchor_buffer: f64,
    pub exit_order: ExitOrder,
    pub gap_scale: GapScale,
    pub duration_strategy: StopDurationStrategy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_count: TargetCount::FractionOfCapacity(0.5),
            edge_bias: -0.1,
            entry_edge_selection: EntryEdgeSelection::SpreadFirst,
            departure_mean: 20.0,
            departure_spread: 10.0,
            reference_speed: 13.89,
            travel_time_basis: TravelTimeBasis::FullRoute,
            anchor_buffer: 20.0,
            exit_order: ExitOrder::LowestEdgeFirst,
            gap_scale: GapScale::Constant(2.0),
            duration_strategy: StopDurationStrategy::SynchronizedExit,
        }
    }
}

impl GeneratorConfig {
    /// Checks the numeric parameters the generator relies on.
    pub fn validate(&self) -> Result<(), ConversionError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConversionError {
            ConversionError::InvalidValue { field, reason: reason.into() }
        }

        match self.target_count {
            TargetCount::Fixed(_) => {}
            TargetCount::FractionOfCapacity(f) if !(0.0..=1.0).contains(&f) => return Err(invalid("targetCount", format!("fraction {} is outside [0, 1]", f))),
            TargetCount::RandomFractionRange { min, max } if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max => {
                return Err(invalid("targetCount", format!("fraction range [{}, {}] is invalid", min, max)));
            }
            _ => {}
        }

        if !self.edge_bias.is_finite() {
            return Err(invalid("edgeBias", "must be finite"));
        }
        if !self.departure_mean.is_finite() || !(self.departure_spread.is_finite() && self.departure_spread >= 0.0) {
            return Err(invalid("departure", "mean must be finite and spread non-negative"));
        }
        if !(self.reference_speed.is_finite() && self.reference_speed > 0.0) {
            return Err(invalid("referenceSpeed", "must be positive"));
        }
        if !(self.anchor_buffer.is_finite() && self.anchor_buffer >= 0.0) {
            return Err(invalid("anchorBuffer", "must be non-negative"));
        }
        match self.gap_scale {
            GapScale::Constant(scale) if !(scale.is_finite() && scale > 0.0) => return Err(invalid("gapScale", "constant scale must be positive")),
            GapScale::EdgeLinear { base, slope } if !(base.is_finite() && base > 0.0 && slope.is_finite() && slope >= 0.0) => {
                return Err(invalid("gapScale", "base must be positive and slope non-negative"));
            }
            _ => {}
        }
        if let StopDurationStrategy::IndependentUniform { min, max } = self.duration_strategy {
            if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max) {
                return Err(invalid("durationStrategy", format!("uniform band [{}, {}] is invalid", min, max)));
            }
        }

        Ok(())
    }
}

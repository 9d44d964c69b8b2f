//! Breakpoint tables.
//!
//! Each table is a chain of contiguous segments starting at zero. Segment `n`
//! covers `(lower, upper]` and maps it affinely onto `(index_low, index_high]`;
//! the next segment starts where this one ends, so the score is continuous at
//! every boundary. The final segment has no upper bound and keeps the slope of
//! the last bounded segment, which makes evaluation total over all
//! non-negative finite inputs.

use aq_common::PollutantKind;

use crate::category::AqiCategory;
use AqiCategory::*;

/// (concentration upper bound, index at that bound, category) in reporting units.
type Breakpoint = (f64, f64, AqiCategory);

/// NO2, ppb.
const NO2: &[Breakpoint] = &[
    (53.0, 50.0, Good),
    (100.0, 100.0, Moderate),
    (360.0, 150.0, UnhealthyForSensitiveGroups),
    (649.0, 200.0, Unhealthy),
    (1249.0, 300.0, VeryUnhealthy),
    (2049.0, 500.0, Hazardous),
];

/// O3, ppb-equivalent.
const O3: &[Breakpoint] = &[
    (54.0, 50.0, Good),
    (70.0, 100.0, Moderate),
    (85.0, 150.0, UnhealthyForSensitiveGroups),
    (105.0, 200.0, Unhealthy),
    (200.0, 300.0, VeryUnhealthy),
    (604.0, 500.0, Hazardous),
];

/// HCHO, ppb.
const HCHO: &[Breakpoint] = &[
    (8.0, 50.0, Good),
    (16.0, 100.0, Moderate),
    (50.0, 150.0, UnhealthyForSensitiveGroups),
    (100.0, 200.0, Unhealthy),
    (200.0, 300.0, VeryUnhealthy),
    (400.0, 500.0, Hazardous),
];

/// Any other product: the value is already on the index scale.
const GENERIC: &[Breakpoint] = &[
    (50.0, 50.0, Good),
    (100.0, 100.0, Moderate),
    (150.0, 150.0, UnhealthyForSensitiveGroups),
    (200.0, 200.0, Unhealthy),
    (300.0, 300.0, VeryUnhealthy),
    (500.0, 500.0, Hazardous),
];

/// One affine piece of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub lower: f64,
    /// `None` for the open-ended final segment.
    pub upper: Option<f64>,
    pub base_index: f64,
    pub index_span: f64,
    pub value_span: f64,
    pub category: AqiCategory,
}

impl Segment {
    /// `base_index + (value − lower) × (index_span / value_span)`.
    pub fn score_at(&self, value: f64) -> f64 {
        self.base_index + (value - self.lower) * self.index_span / self.value_span
    }

    pub fn covers(&self, value: f64) -> bool {
        self.upper.map_or(true, |upper| value <= upper)
    }
}

/// Ordered segments for one pollutant.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    segments: Vec<Segment>,
}

impl BreakpointTable {
    fn from_breakpoints(points: &[Breakpoint]) -> Self {
        let mut segments = Vec::with_capacity(points.len() + 1);
        let (mut lower, mut base) = (0.0, 0.0);
        for &(upper, index, category) in points {
            segments.push(Segment {
                lower,
                upper: Some(upper),
                base_index: base,
                index_span: index - base,
                value_span: upper - lower,
                category,
            });
            lower = upper;
            base = index;
        }
        if let Some(last) = segments.last().copied() {
            segments.push(Segment {
                lower,
                upper: None,
                base_index: base,
                ..last
            });
        }
        Self { segments }
    }

    /// Table for a pollutant; unknown pollutants get the generic scale.
    pub fn for_pollutant(pollutant: &PollutantKind) -> Self {
        Self::from_breakpoints(match pollutant {
            PollutantKind::No2 => NO2,
            PollutantKind::O3 => O3,
            PollutantKind::Hcho => HCHO,
            PollutantKind::Other(_) => GENERIC,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// First segment whose upper bound is ≥ `value`.
    pub fn segment_for(&self, value: f64) -> Option<&Segment> {
        self.segments.iter().find(|s| s.covers(value))
    }

    /// Raw (untruncated) score and category for a non-negative finite value.
    pub fn evaluate(&self, value: f64) -> Option<(f64, AqiCategory)> {
        self.segment_for(value)
            .map(|s| (s.score_at(value), s.category))
    }
}

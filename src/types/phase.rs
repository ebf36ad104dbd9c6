//! Flight phase vocabulary and the phase map produced by classification

use serde::{Deserialize, Serialize};

use super::{TelemetrySample, TelemetrySeries};

// ============================================================================
// Phase
// ============================================================================

/// Named segment of a rocket flight.
///
/// Point phases mark a single instant; range phases span consecutive
/// samples. Declaration order is the order phases appear in a [`PhaseMap`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    // Point events
    Launch,
    Apogee,
    ParachuteDeployed,
    Landing,

    // Range stages
    Ascent,
    Descent,
}

impl Phase {
    /// Every phase in map insertion order.
    pub const ALL: [Phase; 6] = [
        Phase::Launch,
        Phase::Apogee,
        Phase::ParachuteDeployed,
        Phase::Landing,
        Phase::Ascent,
        Phase::Descent,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Phase::Launch => "Launch",
            Phase::Apogee => "Apogee",
            Phase::ParachuteDeployed => "Parachute Deployed",
            Phase::Landing => "Landing",
            Phase::Ascent => "Ascent",
            Phase::Descent => "Descent",
        }
    }

    pub fn is_point_event(self) -> bool {
        matches!(
            self,
            Phase::Launch | Phase::Apogee | Phase::ParachuteDeployed | Phase::Landing
        )
    }

    pub fn is_range_stage(self) -> bool {
        matches!(self, Phase::Ascent | Phase::Descent)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Phase Map
// ============================================================================

/// Sample indices assigned to one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpan {
    pub phase: Phase,
    /// Positions into the classified [`TelemetrySeries`], in assignment order
    pub indices: Vec<usize>,
}

/// Pruned, insertion-ordered mapping from [`Phase`] to sample indices.
///
/// Indices refer to the series the map was classified from; resolve them
/// with [`PhaseMap::samples`]. Phases with no samples never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseMap {
    spans: Vec<PhaseSpan>,
}

impl PhaseMap {
    /// Build a map from per-phase index lists.
    ///
    /// Entries are reordered into [`Phase::ALL`] order and empty lists are
    /// dropped. If a phase repeats, its index lists are concatenated.
    pub fn from_entries(entries: impl IntoIterator<Item = (Phase, Vec<usize>)>) -> Self {
        let mut buckets: [Vec<usize>; 6] = Default::default();
        for (phase, indices) in entries {
            buckets[phase as usize].extend(indices);
        }

        let spans = Phase::ALL
            .iter()
            .zip(buckets)
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(&phase, indices)| PhaseSpan { phase, indices })
            .collect();

        Self { spans }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn contains(&self, phase: Phase) -> bool {
        self.span(phase).is_some()
    }

    pub fn span(&self, phase: Phase) -> Option<&PhaseSpan> {
        self.spans.iter().find(|s| s.phase == phase)
    }

    /// Indices assigned to `phase`; empty when the phase is absent.
    pub fn indices(&self, phase: Phase) -> &[usize] {
        self.span(phase).map_or(&[], |s| s.indices.as_slice())
    }

    /// First index assigned to `phase`, used to seek playback to a phase.
    pub fn first_index(&self, phase: Phase) -> Option<usize> {
        self.indices(phase).first().copied()
    }

    /// Phases present in the map, in insertion order.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.spans.iter().map(|s| s.phase)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhaseSpan> {
        self.spans.iter()
    }

    /// Resolve the samples assigned to `phase` against `series`.
    ///
    /// Indices outside `series` are skipped, which only happens when the map
    /// is paired with a different series than it was classified from.
    pub fn samples<'s>(&self, phase: Phase, series: &'s TelemetrySeries) -> Vec<&'s TelemetrySample> {
        self.indices(phase)
            .iter()
            .filter_map(|&i| series.get(i))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PhaseMap {
    type Item = &'a PhaseSpan;
    type IntoIter = std::slice::Iter<'a, PhaseSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

//! Range-phase construction from milestone indices

/// Index lists for the two range phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeStages {
    pub ascent: Vec<usize>,
    pub descent: Vec<usize>,
}

/// Builds Ascent and Descent from the launch, apogee and landing indices.
///
/// Both ranges end with the apogee index so the trajectory is continuous
/// across the peak:
///
/// - Ascent  = `[launch, apogee)` then `apogee`
/// - Descent = `(apogee, landing)` then `apogee`
///
/// Out-of-order milestones degrade to an apogee-only range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeStageBuilder;

impl RangeStageBuilder {
    /// Returns `None` unless all three milestones are known.
    pub fn build(
        &self,
        launch: Option<usize>,
        apogee: Option<usize>,
        landing: Option<usize>,
    ) -> Option<RangeStages> {
        let (launch, apogee, landing) = (launch?, apogee?, landing?);

        let ascent = (launch..apogee).chain(std::iter::once(apogee)).collect();
        let descent = (apogee + 1..landing).chain(std::iter::once(apogee)).collect();

        Some(RangeStages { ascent, descent })
    }
}

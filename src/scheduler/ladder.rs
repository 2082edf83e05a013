use crate::domain::Interval;
use crate::error::LadderError;
use chrono::Duration;

/// Review intervals used when no ladder is configured
pub const DEFAULT_STEPS: [Interval; 8] = [
    Interval::Hours(12),
    Interval::Days(1),
    Interval::Days(3),
    Interval::Days(7),
    Interval::Days(21),
    Interval::Days(30),
    Interval::Days(45),
    Interval::Days(60),
];

/// Strictly ascending, non-empty sequence of active intervals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    steps: Vec<Interval>,
}

impl Ladder {
    pub fn new(steps: Vec<Interval>) -> Result<Self, LadderError> {
        if steps.is_empty() {
            return Err(LadderError::Empty);
        }

        let mut previous: Option<Duration> = None;
        for (index, step) in steps.iter().enumerate() {
            let length = step
                .duration()
                .ok_or(LadderError::InactiveStep { index })?;
            if previous.is_some_and(|p| length <= p) {
                return Err(LadderError::NotAscending {
                    index,
                    step: step.to_string(),
                });
            }
            previous = Some(length);
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Interval] {
        &self.steps
    }

    /// Interval a new or failed task starts from
    pub fn first(&self) -> Interval {
        // Non-empty by construction
        self.steps[0]
    }

    /// Next interval after a good review.
    ///
    /// Inactive stays inactive. Otherwise this is the smallest step strictly
    /// longer than `current`, or inactive once the top of the ladder is
    /// reached.
    pub fn escalate(&self, current: Interval) -> Interval {
        let Some(length) = current.duration() else {
            return Interval::Inactive;
        };

        self.steps
            .iter()
            .copied()
            .find(|step| step.duration().is_some_and(|d| d > length))
            .unwrap_or(Interval::Inactive)
    }
}

impl Default for Ladder {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS.to_vec(),
        }
    }
}

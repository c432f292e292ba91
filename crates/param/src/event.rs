use std::sync::Arc;

/// A scheduled change to a parameter's value.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Jump to `value` at `time`.
    SetValue { value: f64, time: f64 },

    /// Interpolate linearly from the previous event to `value`, arriving at `time`.
    LinearRamp { value: f64, time: f64 },

    /// Interpolate geometrically from the previous event to `value`, arriving at `time`. Both
    /// endpoints must be strictly positive.
    ExponentialRamp { value: f64, time: f64 },

    /// Decay exponentially toward `target`, starting at `start_time`.
    SetTarget {
        target: f64,
        time_constant: f64,
        start_time: f64,
    },

    /// Walk the `curve` samples linearly over `[start_time, start_time + duration]`.
    SetValueCurve {
        curve: Arc<[f32]>,
        start_time: f64,
        duration: f64,
    },

    /// Remove every event scheduled at or after `time`. Applied when scheduled, never stored.
    CancelScheduled { time: f64 },
}

impl Event {
    /// The time this event is ordered by.
    pub fn time(&self) -> f64 {
        match self {
            Self::SetValue { time, .. }
            | Self::LinearRamp { time, .. }
            | Self::ExponentialRamp { time, .. }
            | Self::CancelScheduled { time } => *time,
            Self::SetTarget { start_time, .. } | Self::SetValueCurve { start_time, .. } => {
                *start_time
            }
        }
    }

    /// Returns true for events that interpolate toward their scheduled time.
    pub fn is_ramp(&self) -> bool {
        matches!(self, Self::LinearRamp { .. } | Self::ExponentialRamp { .. })
    }
}

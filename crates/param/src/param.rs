use crate::{
    call::{Method, Value},
    error::{Error, Result},
    event::Event,
    timeline::Timeline,
};

/// A scalar parameter with a default, a range, and an automation timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioParam {
    default_value: f64,
    min_value: f64,
    max_value: f64,
    base: f64,
    value: f64,
    timeline: Timeline,
}

/// Restrict `value` to `[lo, hi]`, computed as `max(lo, min(hi, value))`. Infinite bounds leave
/// their side unclamped. Unlike [f64::clamp] this never panics when `lo > hi`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

impl AudioParam {
    /// Create a parameter. `min_value <= max_value` is expected but not enforced; pass
    /// [f64::INFINITY] or [f64::NEG_INFINITY] for an unbounded side.
    pub fn new(default_value: f64, min_value: f64, max_value: f64) -> Self {
        let value = clamp(default_value, min_value, max_value);
        Self {
            default_value,
            min_value,
            max_value,
            base: value,
            value,
            timeline: Timeline::new(),
        }
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// The current effective value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Set the value immediately, outside of the timeline. Returns the clamped value that was
    /// stored. The value also becomes the starting point for timeline evaluation, so it only
    /// lasts until the first scheduled event: the next [advance](Self::advance) past a scheduled
    /// event publishes that event's value again.
    pub fn set_value(&mut self, value: f64) -> Result<f64> {
        let value = Method::SetValue.finite(value, 0)?;
        let value = self.clamp(value);
        self.base = value;
        self.value = value;
        Ok(value)
    }

    pub fn set_value_at_time(&mut self, value: f64, time: f64) -> Result<&mut Self> {
        let method = Method::SetValueAtTime;
        let value = method.finite(value, 0)?;
        let time = start_time(method, time, 1)?;
        self.timeline.schedule(Event::SetValue { value, time });
        Ok(self)
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f64, time: f64) -> Result<&mut Self> {
        let method = Method::LinearRampToValueAtTime;
        let value = method.finite(value, 0)?;
        let time = start_time(method, time, 1)?;
        self.timeline.schedule(Event::LinearRamp { value, time });
        Ok(self)
    }

    /// Schedule a geometric ramp. Both the target and the value the ramp starts from must be
    /// strictly positive.
    pub fn exponential_ramp_to_value_at_time(
        &mut self,
        value: f64,
        time: f64,
    ) -> Result<&mut Self> {
        let method = Method::ExponentialRampToValueAtTime;
        let value = method.finite(value, 0)?;
        let time = start_time(method, time, 1)?;
        if value <= 0.0 {
            return Err(Error::Range {
                method,
                reason: "exponential ramp target must be strictly positive",
            });
        }
        if self.timeline.ramp_start(time, self.base) <= 0.0 {
            return Err(Error::Range {
                method,
                reason: "exponential ramp must start from a strictly positive value",
            });
        }
        self.timeline
            .schedule(Event::ExponentialRamp { value, time });
        Ok(self)
    }

    pub fn set_target_at_time(
        &mut self,
        target: f64,
        start: f64,
        time_constant: f64,
    ) -> Result<&mut Self> {
        let method = Method::SetTargetAtTime;
        let target = method.finite(target, 0)?;
        let start_time = start_time(method, start, 1)?;
        let time_constant = method.finite(time_constant, 2)?;
        if time_constant < 0.0 {
            return Err(Error::Range {
                method,
                reason: "time constant must not be negative",
            });
        }
        self.timeline.schedule(Event::SetTarget {
            target,
            time_constant,
            start_time,
        });
        Ok(self)
    }

    pub fn set_value_curve_at_time(
        &mut self,
        curve: &[f32],
        start: f64,
        duration: f64,
    ) -> Result<&mut Self> {
        let method = Method::SetValueCurveAtTime;
        if curve.len() < 2 {
            return Err(Error::InvalidCurve {
                method,
                reason: "curve needs at least two samples",
            });
        }
        if curve.iter().any(|sample| !sample.is_finite()) {
            return Err(Error::InvalidCurve {
                method,
                reason: "curve samples must be finite",
            });
        }
        let start_time = start_time(method, start, 1)?;
        let duration = method.finite(duration, 2)?;
        if duration <= 0.0 {
            return Err(Error::Range {
                method,
                reason: "duration must be strictly positive",
            });
        }
        self.timeline.schedule(Event::SetValueCurve {
            curve: curve.into(),
            start_time,
            duration,
        });
        Ok(self)
    }

    /// Remove every event scheduled at or after `time`.
    pub fn cancel_scheduled_values(&mut self, time: f64) -> Result<&mut Self> {
        let time = start_time(Method::CancelScheduledValues, time, 0)?;
        let removed = self.timeline.cancel(time);
        tracing::trace!(time, removed, "cancelled scheduled values");
        Ok(self)
    }

    /// Evaluate the timeline at `time`. Does not change the parameter.
    pub fn evaluate_at(&self, time: f64) -> f64 {
        self.clamp(self.timeline.evaluate(time, self.base))
    }

    /// Evaluate the timeline at `time` and publish the result as the current value.
    pub fn advance(&mut self, time: f64) -> f64 {
        self.value = self.evaluate_at(time);
        self.value
    }

    /// Drop all automation and return to the default value.
    pub fn reset(&mut self) {
        self.timeline.clear();
        self.base = self.clamp(self.default_value);
        self.value = self.base;
    }

    /// Invoke a scheduling method with untyped arguments. Arity is checked first, then argument
    /// types; nothing is scheduled unless both checks pass.
    pub fn call(&mut self, method: Method, args: &[Value]) -> Result<()> {
        method.check_arity(args)?;
        match method {
            Method::SetValue => {
                self.set_value(method.number(args, 0)?)?;
            }
            Method::SetValueAtTime => {
                let (value, time) = (method.number(args, 0)?, method.number(args, 1)?);
                self.set_value_at_time(value, time)?;
            }
            Method::LinearRampToValueAtTime => {
                let (value, time) = (method.number(args, 0)?, method.number(args, 1)?);
                self.linear_ramp_to_value_at_time(value, time)?;
            }
            Method::ExponentialRampToValueAtTime => {
                let (value, time) = (method.number(args, 0)?, method.number(args, 1)?);
                self.exponential_ramp_to_value_at_time(value, time)?;
            }
            Method::SetTargetAtTime => {
                let target = method.number(args, 0)?;
                let start = method.number(args, 1)?;
                let time_constant = method.number(args, 2)?;
                self.set_target_at_time(target, start, time_constant)?;
            }
            Method::SetValueCurveAtTime => {
                let curve = method.curve(args, 0)?;
                let start = method.number(args, 1)?;
                let duration = method.number(args, 2)?;
                self.set_value_curve_at_time(&curve, start, duration)?;
            }
            Method::CancelScheduledValues => {
                self.cancel_scheduled_values(method.number(args, 0)?)?;
            }
        }
        Ok(())
    }

    fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min_value, self.max_value)
    }
}

/// Validate a scheduling time: finite and not negative.
fn start_time(method: Method, time: f64, index: usize) -> Result<f64> {
    let time = method.finite(time, index)?;
    if time < 0.0 {
        return Err(Error::Range {
            method,
            reason: "time must not be negative",
        });
    }
    Ok(time)
}

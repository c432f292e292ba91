use crate::event::Event;

/// The ordered automation events of one parameter.
///
/// Events are kept sorted by [Event::time]. Events scheduled for the same time keep their
/// insertion order, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    events: Vec<Event>,
}

/// The segment of the timeline that governs the value after the most recently applied event.
#[derive(Copy, Clone, Debug)]
struct Cursor<'a> {
    time: f64,
    value: f64,
    shape: Shape<'a>,
}

#[derive(Copy, Clone, Debug)]
enum Shape<'a> {
    Constant,
    Target { target: f64, time_constant: f64 },
    Curve { curve: &'a [f32], duration: f64 },
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event. [Event::CancelScheduled] truncates the timeline instead of being stored.
    pub fn schedule(&mut self, event: Event) {
        if let Event::CancelScheduled { time } = event {
            self.cancel(time);
            return;
        }
        let time = event.time();
        let index = self.events.partition_point(|e| e.time() <= time);
        self.events.insert(index, event);
    }

    /// Remove every event scheduled at or after `time`, returning how many were removed.
    pub fn cancel(&mut self, time: f64) -> usize {
        let len = self.events.len();
        self.events.retain(|e| e.time() < time);
        len - self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Compute the (unclamped) value at `time`, starting from `initial` at time zero.
    ///
    /// Every event scheduled at or before `time` is applied in order. If the first event after
    /// `time` is a ramp, the result is interpolated between the last applied event and the ramp.
    pub fn evaluate(&self, time: f64, initial: f64) -> f64 {
        let mut cursor = Cursor {
            time: 0.0,
            value: initial,
            shape: Shape::Constant,
        };
        for event in &self.events {
            if event.time() > time {
                return cursor.approach(event, time);
            }
            cursor = cursor.apply(event);
        }
        cursor.value_at(time)
    }

    /// The value a ramp ending at `time` would start from, if it were scheduled now.
    pub fn ramp_start(&self, time: f64, initial: f64) -> f64 {
        let mut cursor = Cursor {
            time: 0.0,
            value: initial,
            shape: Shape::Constant,
        };
        for event in self.events.iter().take_while(|e| e.time() <= time) {
            cursor = cursor.apply(event);
        }
        cursor.anchor().1
    }
}

impl<'a> Cursor<'a> {
    fn apply(self, event: &'a Event) -> Self {
        match event {
            Event::SetValue { value, time }
            | Event::LinearRamp { value, time }
            | Event::ExponentialRamp { value, time } => Self {
                time: *time,
                value: *value,
                shape: Shape::Constant,
            },
            Event::SetTarget {
                target,
                time_constant,
                start_time,
            } => Self {
                time: *start_time,
                value: self.value_at(*start_time),
                shape: Shape::Target {
                    target: *target,
                    time_constant: *time_constant,
                },
            },
            Event::SetValueCurve {
                curve,
                start_time,
                duration,
            } => match curve.first() {
                Some(first) => Self {
                    time: *start_time,
                    value: f64::from(*first),
                    shape: Shape::Curve {
                        curve: &**curve,
                        duration: *duration,
                    },
                },
                None => Self {
                    time: *start_time,
                    value: self.value_at(*start_time),
                    shape: Shape::Constant,
                },
            },
            Event::CancelScheduled { .. } => self,
        }
    }

    /// The value at `time`, for `time` no earlier than the cursor.
    fn value_at(&self, time: f64) -> f64 {
        match self.shape {
            Shape::Constant => self.value,
            Shape::Target {
                target,
                time_constant,
            } => {
                if time_constant <= 0.0 {
                    return target;
                }
                let elapsed = (time - self.time).max(0.0);
                target + (self.value - target) * (-elapsed / time_constant).exp()
            }
            Shape::Curve { curve, duration } => {
                let fraction = if duration > 0.0 {
                    (time - self.time) / duration
                } else {
                    1.0
                };
                sample_curve(curve, fraction)
            }
        }
    }

    /// The point a following ramp starts from.
    fn anchor(&self) -> (f64, f64) {
        match self.shape {
            Shape::Curve { curve, duration } => {
                let last = curve.last().copied().map_or(self.value, f64::from);
                (self.time + duration.max(0.0), last)
            }
            _ => (self.time, self.value),
        }
    }

    /// The value at `time` when `next` is the first event not yet reached.
    fn approach(&self, next: &Event, time: f64) -> f64 {
        let (t0, v0) = self.anchor();
        if !next.is_ramp() || time <= t0 {
            return self.value_at(time);
        }
        match *next {
            Event::LinearRamp { value, time: t1 } => v0 + (value - v0) * (time - t0) / (t1 - t0),
            Event::ExponentialRamp { value, time: t1 } => {
                // Scheduling rejects non-positive start values, but an event inserted later can
                // still move the start. Hold the previous value until the ramp's end.
                if v0 > 0.0 && value > 0.0 {
                    v0 * (value / v0).powf((time - t0) / (t1 - t0))
                } else {
                    self.value_at(time)
                }
            }
            _ => self.value_at(time),
        }
    }
}

/// Linearly interpolate `curve` at `fraction` of its length. Fractions past the end return the
/// last sample.
fn sample_curve(curve: &[f32], fraction: f64) -> f64 {
    let Some(last) = curve.last() else {
        return 0.0;
    };
    if fraction >= 1.0 || curve.len() == 1 {
        return f64::from(*last);
    }
    let position = fraction.max(0.0) * (curve.len() - 1) as f64;
    let index = position.floor() as usize;
    let lo = f64::from(curve[index]);
    let hi = f64::from(curve[(index + 1).min(curve.len() - 1)]);
    lo + (hi - lo) * (position - index as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(value: f64, time: f64) -> Event {
        Event::SetValue { value, time }
    }

    #[test]
    fn set_values_apply_in_time_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(-1.0, 1.0));
        timeline.schedule(set(1.0, 2.0));
        timeline.schedule(set(0.0, 3.0));
        assert_eq!(timeline.evaluate(3.0, 5.0), 0.0);
        assert_eq!(timeline.evaluate(1.5, 5.0), -1.0);
        assert_eq!(timeline.evaluate(0.5, 5.0), 5.0);
    }

    #[test]
    fn out_of_order_scheduling_is_sorted() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(0.0, 3.0));
        timeline.schedule(set(-1.0, 1.0));
        timeline.schedule(set(1.0, 2.0));
        let times = timeline.events().iter().map(Event::time).collect::<Vec<_>>();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(1.0, 1.0));
        timeline.schedule(set(2.0, 1.0));
        assert_eq!(timeline.events()[0], set(1.0, 1.0));
        assert_eq!(timeline.evaluate(1.0, 0.0), 2.0);
    }

    #[test]
    fn linear_ramp() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(0.0, 1.0));
        timeline.schedule(Event::LinearRamp {
            value: 1.0,
            time: 3.0,
        });
        assert_eq!(timeline.evaluate(0.5, 0.0), 0.0);
        assert_relative_eq!(timeline.evaluate(2.0, 0.0), 0.5);
        assert_eq!(timeline.evaluate(3.0, 0.0), 1.0);
        assert_eq!(timeline.evaluate(10.0, 0.0), 1.0);
    }

    #[test]
    fn linear_ramp_from_initial_value() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::LinearRamp {
            value: 0.0,
            time: 4.0,
        });
        assert_relative_eq!(timeline.evaluate(1.0, 1.0), 0.75);
    }

    #[test]
    fn exponential_ramp() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(1.0, 0.0));
        timeline.schedule(Event::ExponentialRamp {
            value: 100.0,
            time: 2.0,
        });
        assert_relative_eq!(timeline.evaluate(1.0, 0.0), 10.0, epsilon = 1e-9);
        assert_eq!(timeline.evaluate(2.0, 0.0), 100.0);
    }

    #[test]
    fn exponential_ramp_from_non_positive_value_holds() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(0.0, 0.0));
        timeline.schedule(Event::ExponentialRamp {
            value: 1.0,
            time: 2.0,
        });
        assert_eq!(timeline.evaluate(1.0, 0.0), 0.0);
        assert_eq!(timeline.evaluate(2.0, 0.0), 1.0);
    }

    #[test]
    fn ramp_start_follows_anchor() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.ramp_start(1.0, 0.5), 0.5);
        timeline.schedule(set(-2.0, 0.0));
        assert_eq!(timeline.ramp_start(2.0, 0.5), -2.0);
        timeline.schedule(Event::SetValueCurve {
            curve: vec![1.0f32, 3.0].into(),
            start_time: 1.0,
            duration: 1.0,
        });
        assert_eq!(timeline.ramp_start(4.0, 0.5), 3.0);
        assert_eq!(timeline.ramp_start(0.5, 0.5), -2.0);
        timeline.schedule(Event::SetTarget {
            target: 0.0,
            time_constant: 1.0,
            start_time: 5.0,
        });
        assert_eq!(timeline.ramp_start(6.0, 0.5), 3.0);
    }

    #[test]
    fn set_target_decays() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::SetTarget {
            target: 0.0,
            time_constant: 1.0,
            start_time: 1.0,
        });
        assert_eq!(timeline.evaluate(0.5, 1.0), 1.0);
        assert_relative_eq!(timeline.evaluate(2.0, 1.0), (-1.0f64).exp());
        assert_relative_eq!(timeline.evaluate(3.0, 1.0), (-2.0f64).exp());
    }

    #[test]
    fn set_target_with_zero_time_constant_jumps() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::SetTarget {
            target: 0.25,
            time_constant: 0.0,
            start_time: 1.0,
        });
        assert_eq!(timeline.evaluate(1.0, 1.0), 0.25);
    }

    #[test]
    fn event_after_target_starts_from_decayed_value() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::SetTarget {
            target: 0.0,
            time_constant: 1.0,
            start_time: 0.0,
        });
        timeline.schedule(Event::SetTarget {
            target: 1.0,
            time_constant: 1.0,
            start_time: 1.0,
        });
        let at_one = (-1.0f64).exp();
        let expected = 1.0 + (at_one - 1.0) * (-1.0f64).exp();
        assert_relative_eq!(timeline.evaluate(2.0, 1.0), expected);
    }

    #[test]
    fn value_curve_interpolates() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::SetValueCurve {
            curve: vec![0.0f32, 1.0, 0.0].into(),
            start_time: 0.0,
            duration: 2.0,
        });
        assert_relative_eq!(timeline.evaluate(0.5, 9.0), 0.5);
        assert_relative_eq!(timeline.evaluate(1.0, 9.0), 1.0);
        assert_relative_eq!(timeline.evaluate(1.5, 9.0), 0.5);
        assert_eq!(timeline.evaluate(5.0, 9.0), 0.0);
    }

    #[test]
    fn ramp_after_curve_starts_at_curve_end() {
        let mut timeline = Timeline::new();
        timeline.schedule(Event::SetValueCurve {
            curve: vec![0.0f32, 1.0].into(),
            start_time: 0.0,
            duration: 2.0,
        });
        timeline.schedule(Event::LinearRamp {
            value: 0.0,
            time: 4.0,
        });
        assert_relative_eq!(timeline.evaluate(1.0, 0.0), 0.5);
        assert_relative_eq!(timeline.evaluate(3.0, 0.0), 0.5);
    }

    #[test]
    fn cancel_removes_events_at_or_after() {
        let mut timeline = Timeline::new();
        timeline.schedule(set(1.0, 1.0));
        timeline.schedule(set(2.0, 2.0));
        timeline.schedule(set(3.0, 3.0));
        timeline.schedule(Event::CancelScheduled { time: 2.0 });
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.evaluate(10.0, 0.0), 1.0);
        assert_eq!(timeline.cancel(0.0), 1);
        assert!(timeline.is_empty());
    }
}

//! Dynamically typed entry point into the scheduling methods.
//!
//! Hosts that forward calls from an untyped surface (a script binding, a control protocol) do not
//! know in advance whether the caller supplied every argument or whether each argument is a
//! number. [AudioParam::call](crate::AudioParam::call) checks arity first, then argument types,
//! and only then forwards to the typed method, so a rejected call never touches the timeline.
use crate::error::{Error, Result};
use core::fmt;

/// A scheduling method of [AudioParam](crate::AudioParam).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    SetValue,
    SetValueAtTime,
    LinearRampToValueAtTime,
    ExponentialRampToValueAtTime,
    SetTargetAtTime,
    SetValueCurveAtTime,
    CancelScheduledValues,
}

/// An untyped argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Curve(Vec<f32>),
    Text(String),
    Bool(bool),
}

impl Method {
    /// The number of arguments the method requires.
    pub fn arity(self) -> usize {
        match self {
            Self::SetValue | Self::CancelScheduledValues => 1,
            Self::SetValueAtTime
            | Self::LinearRampToValueAtTime
            | Self::ExponentialRampToValueAtTime => 2,
            Self::SetTargetAtTime | Self::SetValueCurveAtTime => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SetValue => "set_value",
            Self::SetValueAtTime => "set_value_at_time",
            Self::LinearRampToValueAtTime => "linear_ramp_to_value_at_time",
            Self::ExponentialRampToValueAtTime => "exponential_ramp_to_value_at_time",
            Self::SetTargetAtTime => "set_target_at_time",
            Self::SetValueCurveAtTime => "set_value_curve_at_time",
            Self::CancelScheduledValues => "cancel_scheduled_values",
        }
    }

    /// Fail with [Error::MissingArgument] unless `args` holds enough arguments.
    pub(crate) fn check_arity(self, args: &[Value]) -> Result<()> {
        if args.len() < self.arity() {
            return Err(Error::MissingArgument {
                method: self,
                expected: self.arity(),
                found: args.len(),
            });
        }
        Ok(())
    }

    /// Read argument `index` as a finite number.
    pub(crate) fn number(self, args: &[Value], index: usize) -> Result<f64> {
        match args.get(index) {
            Some(Value::Number(n)) if n.is_finite() => Ok(*n),
            Some(_) => Err(Error::Type {
                method: self,
                index,
            }),
            None => Err(Error::MissingArgument {
                method: self,
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }

    /// Read argument `index` as a curve.
    pub(crate) fn curve(self, args: &[Value], index: usize) -> Result<Vec<f32>> {
        match args.get(index) {
            Some(Value::Curve(curve)) => Ok(curve.clone()),
            Some(_) => Err(Error::InvalidCurve {
                method: self,
                reason: "argument is not a sequence of samples",
            }),
            None => Err(Error::MissingArgument {
                method: self,
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }

    /// Fail with [Error::Type] unless `value` is finite.
    pub(crate) fn finite(self, value: f64, index: usize) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::Type {
                method: self,
                index,
            })
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<f32>> for Value {
    fn from(value: Vec<f32>) -> Self {
        Self::Curve(value)
    }
}

impl From<&[f32]> for Value {
    fn from(value: &[f32]) -> Self {
        Self::Curve(value.to_vec())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

//! Automation engine for a single scalar audio parameter.
//!
//! An [AudioParam] owns a [Timeline] of automation [Event]s and evaluates its effective value as a
//! pure function of the timeline and the queried time. Every value it produces is clamped to the
//! parameter's `[min_value, max_value]` range.
//!
//! ```
//! use patchbay_param::AudioParam;
//!
//! let mut gain = AudioParam::new(1.0, 0.0, 1.0);
//! gain.set_value_at_time(0.0, 0.0).unwrap();
//! gain.linear_ramp_to_value_at_time(1.0, 2.0).unwrap();
//! assert_eq!(gain.evaluate_at(1.0), 0.5);
//! ```
pub mod call;
pub mod error;
pub mod event;
pub mod param;
pub mod timeline;

pub use call::{Method, Value};
pub use error::{Error, Result};
pub use event::Event;
pub use param::{clamp, AudioParam};
pub use timeline::Timeline;

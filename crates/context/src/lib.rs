//! A context that owns a connection graph of audio nodes and drives their parameter automation
//! from a shared clock.
//!
//! ```
//! use patchbay_context::{node::AudioNode, Context, Options};
//!
//! let mut context = Context::new(Options::default()).unwrap();
//! let gain = context.create_gain();
//! gain.connect(context.destination()).unwrap();
//!
//! gain.gain().set_value_at_time(0.0, 0.0).unwrap();
//! gain.gain().linear_ramp_to_value_at_time(1.0, 1.0).unwrap();
//!
//! context.resume().into_inner().unwrap().unwrap();
//! context.advance(0.5).unwrap();
//! assert_eq!(gain.gain().value(), 0.5);
//! ```
pub mod completion;
pub mod context;
mod decode;
pub mod error;
pub mod node;

pub use completion::Completion;
pub use context::{Clock, Context, Options, State};
pub use decode::DECODED_LENGTH;
pub use error::{Error, Result};

pub use automation::{Method, Value};
pub use buffer::AudioBuffer;
pub use graph::{Endpoint, EndpointId, Param};

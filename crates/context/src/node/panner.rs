use crate::{context::Context, error::Result};
use graph::{node::Options, Node, Param};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PanningModel {
    #[default]
    EqualPower,
    Hrtf,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DistanceModel {
    Linear,
    #[default]
    Inverse,
    Exponential,
}

impl PanningModel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EqualPower => "equalpower",
            Self::Hrtf => "HRTF",
        }
    }
}

impl DistanceModel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Inverse => "inverse",
            Self::Exponential => "exponential",
        }
    }
}

/// Positions a signal in 3D space. Only the shape and attributes are modelled.
#[derive(Clone, Debug)]
pub struct Panner {
    pub(crate) node: Node,
    position: [Param; 3],
    orientation: [Param; 3],
    panning_model: PanningModel,
    distance_model: DistanceModel,
}

impl Panner {
    pub const REF_DISTANCE: f64 = 1.0;
    pub const MAX_DISTANCE: f64 = 10000.0;
    pub const ROLLOFF_FACTOR: f64 = 1.0;
    pub const CONE_INNER_ANGLE: f64 = 360.0;
    pub const CONE_OUTER_ANGLE: f64 = 360.0;
    pub const CONE_OUTER_GAIN: f64 = 0.0;

    pub fn new(context: &Context) -> Self {
        let node = context.create_node(Options::new(2, 1, 1));
        let param = |default| Param::new(&node, default, f64::NEG_INFINITY, f64::INFINITY);
        let position = [param(0.0), param(0.0), param(0.0)];
        let orientation = [param(1.0), param(0.0), param(0.0)];
        Self {
            node,
            position,
            orientation,
            panning_model: PanningModel::default(),
            distance_model: DistanceModel::default(),
        }
    }

    pub fn position_x(&self) -> &Param {
        &self.position[0]
    }

    pub fn position_y(&self) -> &Param {
        &self.position[1]
    }

    pub fn position_z(&self) -> &Param {
        &self.position[2]
    }

    pub fn orientation_x(&self) -> &Param {
        &self.orientation[0]
    }

    pub fn orientation_y(&self) -> &Param {
        &self.orientation[1]
    }

    pub fn orientation_z(&self) -> &Param {
        &self.orientation[2]
    }

    /// Set all three position parameters immediately.
    pub fn set_position(&self, x: f64, y: f64, z: f64) -> Result<()> {
        set_all(&self.position, [x, y, z])
    }

    /// Set all three orientation parameters immediately.
    pub fn set_orientation(&self, x: f64, y: f64, z: f64) -> Result<()> {
        set_all(&self.orientation, [x, y, z])
    }

    pub fn panning_model(&self) -> PanningModel {
        self.panning_model
    }

    pub fn set_panning_model(&mut self, model: PanningModel) {
        self.panning_model = model;
    }

    pub fn distance_model(&self) -> DistanceModel {
        self.distance_model
    }

    pub fn set_distance_model(&mut self, model: DistanceModel) {
        self.distance_model = model;
    }

    pub fn ref_distance(&self) -> f64 {
        Self::REF_DISTANCE
    }

    pub fn max_distance(&self) -> f64 {
        Self::MAX_DISTANCE
    }

    pub fn rolloff_factor(&self) -> f64 {
        Self::ROLLOFF_FACTOR
    }

    pub fn cone_inner_angle(&self) -> f64 {
        Self::CONE_INNER_ANGLE
    }

    pub fn cone_outer_angle(&self) -> f64 {
        Self::CONE_OUTER_ANGLE
    }

    pub fn cone_outer_gain(&self) -> f64 {
        Self::CONE_OUTER_GAIN
    }
}

// All values are checked before any parameter changes.
fn set_all(params: &[Param; 3], values: [f64; 3]) -> Result<()> {
    if values.iter().any(|value| !value.is_finite()) {
        return Err(crate::Error::Type("coordinates must be finite numbers"));
    }
    for (param, value) in params.iter().zip(values) {
        param.set_value(value)?;
    }
    Ok(())
}

pub mod geometry;
pub mod helper;
pub mod restrictions;

pub use geometry::{Point, WheelGeometry};
pub use helper::{ComputationHelper, GeometryError};
pub use restrictions::{AngularRestrictions, RestrictionBounds, RestrictionsError};

pub const ANGLE_EPSILON: f64 = 1e-9;

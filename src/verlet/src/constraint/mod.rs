pub mod distance;

pub use distance::DistanceConstraint;

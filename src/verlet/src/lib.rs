pub mod cloth;
pub mod constraint;
pub mod controller_message;
pub mod cworld;
pub mod particle;
pub mod posbox;
pub mod tear;

pub type V2 = nalgebra::Vector2<f32>;

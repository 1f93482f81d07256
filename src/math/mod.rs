pub mod m3;

pub use m3::{clip_to_pixel, compose, projection, rotation, scaling, transform_point, translation};

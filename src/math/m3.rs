use glam::{Mat3, Vec2, Vec3};

use crate::state::TransformState;

/// Maps pixel coordinates (origin top-left, Y down) to clip space (Y up).
pub fn projection(width: f32, height: f32) -> Mat3 {
    Mat3::from_cols(
        Vec3::new(2.0 / width, 0.0, 0.0),
        Vec3::new(0.0, -2.0 / height, 0.0),
        Vec3::new(-1.0, 1.0, 1.0),
    )
}

pub fn translation(tx: f32, ty: f32) -> Mat3 {
    Mat3::from_cols(Vec3::X, Vec3::Y, Vec3::new(tx, ty, 1.0))
}

/// Rotation in pixel space. With Y pointing down a positive angle turns
/// counter-clockwise on screen.
pub fn rotation(angle_radians: f32) -> Mat3 {
    let (s, c) = angle_radians.sin_cos();
    Mat3::from_cols(Vec3::new(c, -s, 0.0), Vec3::new(s, c, 0.0), Vec3::Z)
}

pub fn scaling(sx: f32, sy: f32) -> Mat3 {
    Mat3::from_cols(Vec3::new(sx, 0.0, 0.0), Vec3::new(0.0, sy, 0.0), Vec3::Z)
}

/// `m * translation(tx, ty)`
pub fn translate(m: Mat3, tx: f32, ty: f32) -> Mat3 {
    m * translation(tx, ty)
}

/// `m * rotation(angle_radians)`
pub fn rotate(m: Mat3, angle_radians: f32) -> Mat3 {
    m * rotation(angle_radians)
}

/// `m * scaling(sx, sy)`
pub fn scale(m: Mat3, sx: f32, sy: f32) -> Mat3 {
    m * scaling(sx, sy)
}

/// Full per-frame transform: projection, then translate, rotate and scale.
///
/// Matrices are right-multiplied, so a vertex is scaled first, then rotated,
/// then translated and finally projected into clip space. The order is part
/// of the contract; swapping any two steps changes the result.
pub fn compose(width: f32, height: f32, state: &TransformState) -> Mat3 {
    let (tx, ty) = state.translation;
    let (sx, sy) = state.scale;

    let m = projection(width, height);
    let m = translate(m, tx, ty);
    let m = rotate(m, state.angle_radians);
    scale(m, sx, sy)
}

/// Applies `m` to a 2D point in homogeneous coordinates (w = 1).
pub fn transform_point(m: &Mat3, p: Vec2) -> Vec2 {
    m.transform_point2(p)
}

/// Inverse of [`projection`] for a single clip-space point.
pub fn clip_to_pixel(clip: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new((clip.x + 1.0) * 0.5 * width, (1.0 - clip.y) * 0.5 * height)
}

use serde::{Deserialize, Serialize};

/// Translation, rotation and scale of the rectangle.
///
/// Owned by the [`Controller`](crate::controller::Controller); the renderer
/// only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformState {
    /// Pixel offset from the top-left corner of the canvas.
    pub translation: (f32, f32),
    pub angle_radians: f32,
    pub scale: (f32, f32),
}

impl TransformState {
    pub const fn new(translation: (f32, f32), angle_radians: f32, scale: (f32, f32)) -> Self {
        Self {
            translation,
            angle_radians,
            scale,
        }
    }

    /// No translation, rotation or scaling.
    pub const fn identity() -> Self {
        Self::new((0.0, 0.0), 0.0, (1.0, 1.0))
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new((200.0, 150.0), 0.0, (1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_centers_on_400x300_canvas() {
        let state = TransformState::default();
        assert_eq!(state.translation, (200.0, 150.0));
        assert_eq!(state.angle_radians, 0.0);
        assert_eq!(state.scale, (1.0, 1.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let state: TransformState = serde_json::from_str(r#"{ "scale": [2.0, -1.0] }"#).unwrap();
        assert_eq!(state.translation, (200.0, 150.0));
        assert_eq!(state.scale, (2.0, -1.0));
    }
}

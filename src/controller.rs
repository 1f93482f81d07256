use std::fmt;

use crate::state::TransformState;

/// The state field a slider drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderField {
    X,
    Y,
    Angle,
    ScaleX,
    ScaleY,
}

impl SliderField {
    pub const ALL: [SliderField; 5] = [
        SliderField::X,
        SliderField::Y,
        SliderField::Angle,
        SliderField::ScaleX,
        SliderField::ScaleY,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SliderField::X => "x",
            SliderField::Y => "y",
            SliderField::Angle => "angle",
            SliderField::ScaleX => "scaleX",
            SliderField::ScaleY => "scaleY",
        }
    }
}

/// Slider configuration: initial position, range, step and the number of
/// decimals shown next to the handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub precision: usize,
}

impl SliderSpec {
    pub const fn new(value: f32, max: f32) -> Self {
        Self {
            value,
            min: 0.0,
            max,
            step: 1.0,
            precision: 0,
        }
    }

    pub const fn with_min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Converts the angle slider position (degrees) to the stored angle.
///
/// The slider runs in the opposite direction to the rotation matrix, so the
/// value is mirrored before conversion.
pub fn slider_degrees_to_radians(degrees: f32) -> f32 {
    (360.0 - degrees).to_radians()
}

/// Inverse of [`slider_degrees_to_radians`], normalized to [0, 360).
pub fn radians_to_slider_degrees(radians: f32) -> f32 {
    (360.0 - radians.to_degrees()).rem_euclid(360.0)
}

/// Change handler bound to one field.
pub type SlideHandler = fn(&mut TransformState, f32);

/// Returns the handler that writes a slider value into `field`.
pub fn slide_handler(field: SliderField) -> SlideHandler {
    match field {
        SliderField::X => |state: &mut TransformState, value: f32| state.translation.0 = value,
        SliderField::Y => |state: &mut TransformState, value: f32| state.translation.1 = value,
        SliderField::Angle => |state: &mut TransformState, value: f32| {
            state.angle_radians = slider_degrees_to_radians(value)
        },
        SliderField::ScaleX => |state: &mut TransformState, value: f32| state.scale.0 = value,
        SliderField::ScaleY => |state: &mut TransformState, value: f32| state.scale.1 = value,
    }
}

/// A configured slider and the handler it calls on change.
#[derive(Clone, Copy)]
pub struct Slider {
    pub field: SliderField,
    pub spec: SliderSpec,
    handler: SlideHandler,
}

impl Slider {
    fn new(field: SliderField, spec: SliderSpec) -> Self {
        Self {
            field,
            spec,
            handler: slide_handler(field),
        }
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("field", &self.field)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Owns the transform state and the five sliders that edit it.
///
/// Every accepted slider change marks the controller dirty; the window
/// redraws as soon as it sees the flag.
#[derive(Debug, Clone)]
pub struct Controller {
    initial: TransformState,
    state: TransformState,
    sliders: [Slider; 5],
    needs_redraw: bool,
}

impl Controller {
    pub fn new(initial: TransformState, canvas_width: f32, canvas_height: f32) -> Self {
        let sliders = SliderField::ALL.map(|field| Slider::new(field, Self::spec_for(field, &initial)));
        let mut controller = Self {
            initial,
            state: initial,
            sliders,
            needs_redraw: true,
        };
        controller.set_canvas_size(canvas_width, canvas_height);
        controller
    }

    fn spec_for(field: SliderField, state: &TransformState) -> SliderSpec {
        match field {
            SliderField::X => SliderSpec::new(state.translation.0, 0.0),
            SliderField::Y => SliderSpec::new(state.translation.1, 0.0),
            SliderField::Angle => {
                // The stored angle 0 shows as 0 rather than the equivalent 360.
                let degrees = if state.angle_radians == 0.0 {
                    0.0
                } else {
                    radians_to_slider_degrees(state.angle_radians)
                };
                SliderSpec::new(degrees, 360.0)
            }
            SliderField::ScaleX => Self::scale_spec(state.scale.0),
            SliderField::ScaleY => Self::scale_spec(state.scale.1),
        }
    }

    fn scale_spec(value: f32) -> SliderSpec {
        SliderSpec::new(value, 5.0)
            .with_min(-5.0)
            .with_step(0.01)
            .with_precision(2)
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn slider(&self, field: SliderField) -> &Slider {
        &self.sliders[Self::index(field)]
    }

    fn index(field: SliderField) -> usize {
        match field {
            SliderField::X => 0,
            SliderField::Y => 1,
            SliderField::Angle => 2,
            SliderField::ScaleX => 3,
            SliderField::ScaleY => 4,
        }
    }

    /// The X and Y sliders span the canvas.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.sliders[Self::index(SliderField::X)].spec.max = width;
        self.sliders[Self::index(SliderField::Y)].spec.max = height;
    }

    /// Applies a new slider value to its field and requests a redraw.
    ///
    /// The value is stored as given; range limits are the widget's business.
    pub fn slide(&mut self, field: SliderField, value: f32) {
        let slider = &mut self.sliders[Self::index(field)];
        slider.spec.value = value;
        (slider.handler)(&mut self.state, value);
        self.needs_redraw = true;
        log::debug!("{} -> {} ({:?})", field.label(), value, self.state);
    }

    /// Restores the state the controller was created with.
    pub fn reset(&mut self) {
        self.state = self.initial;
        for slider in self.sliders.iter_mut() {
            slider.spec.value = Self::spec_for(slider.field, &self.initial).value;
        }
        self.needs_redraw = true;
        log::info!("Transform reset");
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Clears and returns the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn controller() -> Controller {
        Controller::new(TransformState::default(), 400.0, 300.0)
    }

    #[test]
    fn test_slider_specs() {
        let c = controller();
        assert_eq!(c.slider(SliderField::X).spec, SliderSpec::new(200.0, 400.0));
        assert_eq!(c.slider(SliderField::Y).spec, SliderSpec::new(150.0, 300.0));
        assert_eq!(c.slider(SliderField::Angle).spec, SliderSpec::new(0.0, 360.0));

        let scale = c.slider(SliderField::ScaleX).spec;
        assert_eq!((scale.min, scale.max), (-5.0, 5.0));
        assert_eq!(scale.step, 0.01);
        assert_eq!(scale.precision, 2);
        assert_eq!(scale.value, 1.0);
    }

    #[test]
    fn test_sliders_follow_field_order() {
        let c = controller();
        let fields: Vec<_> = c.sliders().iter().map(|s| s.field).collect();
        assert_eq!(fields, SliderField::ALL.to_vec());
    }

    #[test]
    fn test_angle_slider_is_inverted() {
        assert!((slider_degrees_to_radians(0.0) - 2.0 * PI).abs() < 1e-6);
        assert!((slider_degrees_to_radians(90.0) - 1.5 * PI).abs() < 1e-6);
        assert!(slider_degrees_to_radians(360.0).abs() < 1e-6);
    }

    #[test]
    fn test_radians_to_slider_degrees_round_trips() {
        for degrees in [0.0, 45.0, 90.0, 180.0, 270.0, 359.0] {
            let back = radians_to_slider_degrees(slider_degrees_to_radians(degrees));
            let diff = (back - degrees).abs();
            assert!(diff < 1e-3 || (diff - 360.0).abs() < 1e-3, "{} -> {}", degrees, back);
        }
    }

    #[test]
    fn test_take_redraw_clears_flag() {
        let mut c = controller();
        assert!(c.take_redraw(), "first frame must be drawn");
        assert!(!c.take_redraw());
        c.request_redraw();
        assert!(c.take_redraw());
    }
}

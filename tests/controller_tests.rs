use affine_rect::controller::{slide_handler, Controller, SliderField};
use affine_rect::math::m3;
use affine_rect::TransformState;

#[cfg(test)]
mod controller_tests {
    use super::*;

    fn fresh() -> Controller {
        let mut controller = Controller::new(TransformState::default(), 400.0, 300.0);
        controller.take_redraw();
        controller
    }

    /// Fields of a state other than the one a slider drives.
    fn untouched(state: &TransformState, field: SliderField) -> Vec<f32> {
        let all = [
            (SliderField::X, state.translation.0),
            (SliderField::Y, state.translation.1),
            (SliderField::Angle, state.angle_radians),
            (SliderField::ScaleX, state.scale.0),
            (SliderField::ScaleY, state.scale.1),
        ];
        all.iter()
            .filter(|(f, _)| *f != field)
            .map(|(_, v)| *v)
            .collect()
    }

    #[test]
    fn test_each_slider_mutates_exactly_one_field() {
        for field in SliderField::ALL {
            let mut controller = fresh();
            let before = *controller.state();
            controller.slide(field, 3.0);
            let after = *controller.state();

            assert_ne!(before, after, "{:?} did not change the state", field);
            assert_eq!(
                untouched(&before, field),
                untouched(&after, field),
                "{:?} touched another field",
                field
            );
        }
    }

    #[test]
    fn test_every_slide_requests_a_redraw() {
        let mut controller = fresh();
        assert!(!controller.take_redraw());

        for (i, field) in SliderField::ALL.iter().enumerate() {
            controller.slide(*field, i as f32);
            assert!(controller.take_redraw(), "{:?} did not request a redraw", field);
        }
    }

    #[test]
    fn test_position_sliders_write_translation() {
        let mut controller = fresh();
        controller.slide(SliderField::X, 12.0);
        controller.slide(SliderField::Y, 34.0);
        assert_eq!(controller.state().translation, (12.0, 34.0));
        assert_eq!(controller.slider(SliderField::X).spec.value, 12.0);
    }

    #[test]
    fn test_angle_slider_inverts_direction() {
        let mut controller = fresh();
        controller.slide(SliderField::Angle, 90.0);
        let expected = 270f32.to_radians();
        assert!((controller.state().angle_radians - expected).abs() < 1e-6);
        assert_eq!(controller.slider(SliderField::Angle).spec.value, 90.0);
    }

    #[test]
    fn test_angle_slider_ends_render_identically() {
        let mut at_zero = fresh();
        at_zero.slide(SliderField::Angle, 0.0);
        let mut at_full = fresh();
        at_full.slide(SliderField::Angle, 360.0);

        let a = m3::compose(400.0, 300.0, at_zero.state()).to_cols_array();
        let b = m3::compose(400.0, 300.0, at_full.state()).to_cols_array();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_scale_sliders_accept_negative_and_zero() {
        let mut controller = fresh();
        controller.slide(SliderField::ScaleX, -5.0);
        controller.slide(SliderField::ScaleY, 0.0);
        assert_eq!(controller.state().scale, (-5.0, 0.0));
    }

    #[test]
    fn test_position_ranges_follow_canvas() {
        let mut controller = fresh();
        controller.set_canvas_size(1280.0, 720.0);
        assert_eq!(controller.slider(SliderField::X).spec.max, 1280.0);
        assert_eq!(controller.slider(SliderField::Y).spec.max, 720.0);
        assert_eq!(controller.slider(SliderField::Angle).spec.max, 360.0);
    }

    #[test]
    fn test_reset_restores_initial_state_and_sliders() {
        let initial = TransformState::new((10.0, 20.0), 0.0, (2.0, 2.0));
        let mut controller = Controller::new(initial, 400.0, 300.0);
        controller.slide(SliderField::X, 300.0);
        controller.slide(SliderField::Angle, 45.0);
        controller.take_redraw();

        controller.reset();

        assert_eq!(*controller.state(), initial);
        assert_eq!(controller.slider(SliderField::X).spec.value, 10.0);
        assert_eq!(controller.slider(SliderField::Angle).spec.value, 0.0);
        assert!(controller.take_redraw());
    }

    #[test]
    fn test_initial_angle_shows_on_slider() {
        let initial = TransformState::new((0.0, 0.0), 270f32.to_radians(), (1.0, 1.0));
        let controller = Controller::new(initial, 400.0, 300.0);
        let degrees = controller.slider(SliderField::Angle).spec.value;
        assert!((degrees - 90.0).abs() < 1e-3, "got {}", degrees);
    }

    #[test]
    fn test_handler_factory_binds_field() {
        let mut state = TransformState::identity();
        slide_handler(SliderField::ScaleY)(&mut state, 4.0);
        assert_eq!(state.scale, (1.0, 4.0));
        slide_handler(SliderField::X)(&mut state, 7.0);
        assert_eq!(state.translation, (7.0, 0.0));
    }
}

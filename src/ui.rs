use crate::controller::{Controller, Slider};

/// Builds the slider panel. Every changed slider goes straight to
/// [`Controller::slide`], so the rectangle drawn later in the same frame
/// already reflects it.
pub fn draw_controls(ctx: &egui::Context, controller: &mut Controller) {
    egui::Window::new("Transform")
        .title_bar(true)
        .resizable(false)
        .default_pos(egui::pos2(10.0, 10.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            let sliders: Vec<Slider> = controller.sliders().to_vec();
            for slider in sliders {
                let mut value = slider.spec.value;
                if ui.add(slider_widget(&slider, &mut value)).changed() {
                    controller.slide(slider.field, value);
                }
            }

            ui.add_space(5.0);
            ui.separator();

            let state = controller.state();
            ui.monospace(format!(
                "t=({:.0}, {:.0}) a={:.1}° s=({:.2}, {:.2})",
                state.translation.0,
                state.translation.1,
                state.angle_radians.to_degrees(),
                state.scale.0,
                state.scale.1
            ));

            if ui.button("Reset").clicked() {
                controller.reset();
            }
        });
}

fn slider_widget<'a>(slider: &Slider, value: &'a mut f32) -> egui::Slider<'a> {
    let spec = slider.spec;
    egui::Slider::new(value, spec.min..=spec.max)
        .step_by(spec.step as f64)
        .fixed_decimals(spec.precision)
        .text(slider.field.label())
}

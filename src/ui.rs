use crate::pose::{AnimationDriver, Joint};
use crate::settings::ViewSettings;

pub struct Ui {
    pub settings: ViewSettings,
    upper_slider: f32,
    lower_slider: f32,
    yaw_slider: f32,
}

pub struct UiResponse {
    pub reset_camera: bool,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            settings: ViewSettings::load(),
            upper_slider: 0.0,
            lower_slider: 0.0,
            yaw_slider: 0.0,
        }
    }

    /// Builds the control panel for this frame. Joint sliders only act
    /// while the animation is off; the driver ignores them otherwise.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        driver: &mut AnimationDriver,
        frame_ms: f32,
    ) -> UiResponse {
        let mut response = UiResponse {
            reset_camera: false,
        };

        if !self.settings.show_controls {
            egui::Window::new("controls_toggle")
                .title_bar(false)
                .resizable(false)
                .show(ctx, |ui| {
                    if ui.button("Show controls").clicked() {
                        self.settings.show_controls = true;
                        self.settings.save();
                    }
                });
            return response;
        }

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Animation");
            ui.horizontal(|ui| {
                if ui.selectable_label(driver.is_animating(), "On").clicked() {
                    driver.set_animating(true);
                }
                if ui.selectable_label(!driver.is_animating(), "Off").clicked() {
                    driver.set_animating(false);
                }
            });

            // Mirror the driver's current values so the sliders track the
            // phase function while animating.
            let params = driver.params();
            self.upper_slider = params.upper_angle;
            self.lower_slider = params.lower_angle;
            self.yaw_slider = params.global_yaw;

            ui.add_enabled_ui(!driver.is_animating(), |ui| {
                if ui
                    .add(egui::Slider::new(&mut self.upper_slider, -60.0..=60.0).text("Upper joint"))
                    .changed()
                {
                    driver.set_upper_angle(self.upper_slider);
                }
                if ui
                    .add(egui::Slider::new(&mut self.lower_slider, -60.0..=60.0).text("Lower joint"))
                    .changed()
                {
                    driver.set_lower_angle(self.lower_slider);
                }
            });

            if let Some(joint) = driver.last_touched() {
                let name = match joint {
                    Joint::Upper => "upper",
                    Joint::Lower => "lower",
                };
                ui.small(format!("last touched: {name} joint"));
            }

            ui.separator();
            if ui
                .add(egui::Slider::new(&mut self.yaw_slider, -180.0..=180.0).text("Global yaw"))
                .changed()
            {
                driver.set_global_yaw(self.yaw_slider);
            }

            ui.separator();
            ui.heading("View");
            ui.horizontal(|ui| {
                ui.label("Background:");
                if ui
                    .color_edit_button_rgb(&mut self.settings.background_color)
                    .changed()
                {
                    self.settings.save();
                }
            });
            if ui.button("Reset camera").clicked() {
                response.reset_camera = true;
            }
            if ui.button("Hide controls").clicked() {
                self.settings.show_controls = false;
                self.settings.save();
            }

            ui.separator();
            let fps = if frame_ms > 0.0 { 1000.0 / frame_ms } else { 0.0 };
            ui.small(format!("frame: {frame_ms:.1} ms ({fps:.0} fps)"));
        });

        response
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

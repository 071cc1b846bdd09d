//! Control panel for the island scene.
//!
//! One small window with the same controls the scene exposes: wireframe and
//! spin toggles, the two gradient colors, and the island height slider.

use crate::settings::{SceneSettings, SettingsChanges};

/// Builds the settings panel and reports which settings were edited.
pub fn settings_panel(ui: &imgui::Ui, settings: &mut SceneSettings) -> SettingsChanges {
    let mut changes = SettingsChanges::default();

    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return changes;
    }

    ui.window("Island Controls")
        .size([320.0, 260.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            if ui.checkbox("Wireframe", &mut settings.wireframe) {
                changes.wireframe_toggled = true;
            }

            ui.checkbox("Spin", &mut settings.spin);

            ui.separator();
            ui.text("Island colors");

            if ui.color_edit3("Surface", &mut settings.island_color) {
                changes.colors_changed = true;
            }
            if ui.color_edit3("Underside", &mut settings.bottom_color) {
                changes.colors_changed = true;
            }

            ui.separator();

            if ui.slider("Height", -10.0, 10.0, &mut settings.island_height) {
                changes.height_changed = true;
            }
        });

    changes
}

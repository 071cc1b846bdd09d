//! User-adjustable scene settings.
//!
//! The control panel edits a [`SceneSettings`] value each frame and reports
//! what changed through [`SettingsChanges`], so the frame loop only reacts to
//! actual edits (recoloring is not cheap, and wireframe toggles are
//! debounced).

use crate::gradient::GradientStops;

/// Everything the control panel can change.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Render the island group as wireframe (debounced before applying).
    pub wireframe: bool,
    /// Spin the island group.
    pub spin: bool,
    /// Vertical position of the island group.
    pub island_height: f32,
    /// Mid gradient stop, the island's surface color.
    pub island_color: [f32; 3],
    /// Bottom gradient stop, the island's underside color.
    pub bottom_color: [f32; 3],
}

impl Default for SceneSettings {
    fn default() -> Self {
        let stops = GradientStops::default();
        Self {
            wireframe: false,
            spin: false,
            island_height: crate::island::DEFAULT_HEIGHT,
            island_color: stops.mid,
            bottom_color: stops.bottom,
        }
    }
}

/// What the panel changed this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsChanges {
    pub wireframe_toggled: bool,
    pub colors_changed: bool,
    pub height_changed: bool,
}

impl SettingsChanges {
    pub fn any(&self) -> bool {
        self.wireframe_toggled || self.colors_changed || self.height_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gradient_stops() {
        let settings = SceneSettings::default();
        let stops = GradientStops::default();
        assert_eq!(settings.island_color, stops.mid);
        assert_eq!(settings.bottom_color, stops.bottom);
        assert_eq!(settings.island_height, -5.0);
    }

    #[test]
    fn no_changes_by_default() {
        assert!(!SettingsChanges::default().any());
    }
}

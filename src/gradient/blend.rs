//! Three-stop color gradient evaluation
//!
//! Pure piecewise-linear blending between three RGB stops. This is the
//! innermost function of the island coloring path and has no side effects,
//! so it is tested directly against its algebraic definition.

/// An RGB color with normalized `[0, 1]` channels.
pub type Color = [f32; 3];

/// The three stops of the island gradient, ordered by height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStops {
    /// Color at the top of the height domain. Present in the config but not
    /// currently wired to any control (reserved).
    pub top: Color,
    /// Color at the domain midpoint ("Island Color" in the UI).
    pub mid: Color,
    /// Color at the bottom of the height domain.
    pub bottom: Color,
}

impl Default for GradientStops {
    fn default() -> Self {
        Self {
            top: [0.6431, 0.5412, 0.7216],    // #a48ab8
            mid: [0.3412, 0.3451, 0.1059],    // #57581b
            bottom: [0.7294, 0.0000, 0.4196], // #ba006b
        }
    }
}

/// Per-channel linear interpolation between two colors.
pub fn lerp(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Evaluates the three-stop gradient at `t`.
///
/// For `t < 0.5` this blends from `bottom` to `mid` with local factor `t * 2`;
/// otherwise from `mid` to `top` with local factor `(t - 0.5) * 2`. The tie at
/// exactly 0.5 routes to the upper segment; both segments evaluate to `mid`
/// there, so the gradient is continuous.
///
/// `t` outside `[0, 1]` extrapolates linearly along the nearest segment.
pub fn blend(t: f32, stops: &GradientStops) -> Color {
    if t < 0.5 {
        lerp(stops.bottom, stops.mid, t * 2.0)
    } else {
        lerp(stops.mid, stops.top, (t - 0.5) * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> GradientStops {
        GradientStops {
            top: [1.0, 1.0, 1.0],
            mid: [0.0, 0.0, 0.0],
            bottom: [0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let s = stops();
        assert_eq!(blend(0.0, &s), s.bottom);
        assert_eq!(blend(1.0, &s), s.top);
    }

    #[test]
    fn midpoint_routes_to_upper_segment() {
        let s = stops();
        // Both segments agree at the boundary, so the tie-break is invisible
        // in the output.
        assert_eq!(blend(0.5, &s), s.mid);
    }

    #[test]
    fn lower_segment_matches_lerp() {
        let s = stops();
        for i in 0..50 {
            let t = i as f32 / 100.0;
            assert_eq!(blend(t, &s), lerp(s.bottom, s.mid, t * 2.0));
        }
    }

    #[test]
    fn upper_segment_matches_lerp() {
        let s = stops();
        for i in 50..=100 {
            let t = i as f32 / 100.0;
            assert_eq!(blend(t, &s), lerp(s.mid, s.top, (t - 0.5) * 2.0));
        }
    }

    #[test]
    fn continuous_at_midpoint() {
        let s = stops();
        let eps = 1e-6;
        let below = blend(0.5 - eps, &s);
        let at = blend(0.5, &s);
        for c in 0..3 {
            assert!((below[c] - at[c]).abs() < 1e-4);
        }
    }

    #[test]
    fn quarter_point_scenario() {
        // blend(0.25) = lerp(bottom, mid, 0.5) = (0, 0, 0.5)
        let got = blend(0.25, &stops());
        assert_eq!(got, [0.0, 0.0, 0.5]);
    }
}

//! Vertex color synthesis
//!
//! Walks a mesh's vertex positions, maps the coordinate along the chosen
//! height axis into the gradient parameter `t`, and produces one RGB triple
//! per vertex. The output buffer is always a full replacement for the mesh's
//! color attribute, never a partial patch.

use super::blend::{blend, GradientStops};

/// Which position component drives the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightAxis {
    X,
    Y,
    Z,
}

impl HeightAxis {
    fn index(self) -> usize {
        match self {
            HeightAxis::X => 0,
            HeightAxis::Y => 1,
            HeightAxis::Z => 2,
        }
    }
}

/// Linearly maps `value` from `domain` to `[0, 1]`.
///
/// Values outside the domain are not clamped; they extrapolate linearly, which
/// matches the reference coloring of vertices that fall outside the assumed
/// height range.
pub fn map_linear(value: f32, domain: (f32, f32)) -> f32 {
    (value - domain.0) / (domain.1 - domain.0)
}

/// Synthesizes a flat RGB color buffer for `positions`.
///
/// The returned buffer holds exactly three floats per input vertex, in vertex
/// order. Pure with respect to its inputs; callers are responsible for
/// swapping the result into the mesh's GPU-visible attribute.
pub fn synthesize(
    positions: &[[f32; 3]],
    axis: HeightAxis,
    domain: (f32, f32),
    stops: &GradientStops,
) -> Vec<f32> {
    let idx = axis.index();
    let mut colors = Vec::with_capacity(positions.len() * 3);

    for position in positions {
        let t = map_linear(position[idx], domain);
        let color = blend(t, stops);
        colors.extend_from_slice(&color);
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: (f32, f32) = (-5.0, 10.0);

    fn stops() -> GradientStops {
        GradientStops {
            top: [1.0, 0.0, 0.0],
            mid: [0.0, 1.0, 0.0],
            bottom: [0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn output_length_is_three_per_vertex() {
        for n in [0usize, 1, 7, 256] {
            let positions = vec![[0.0, 1.0, 2.0]; n];
            let colors = synthesize(&positions, HeightAxis::Y, DOMAIN, &stops());
            assert_eq!(colors.len(), 3 * positions.len());
        }
    }

    #[test]
    fn domain_endpoints_hit_outer_stops() {
        let s = stops();
        let positions = [[0.0, -5.0, 0.0], [0.0, 10.0, 0.0]];
        let colors = synthesize(&positions, HeightAxis::Y, DOMAIN, &s);
        assert_eq!(&colors[0..3], &s.bottom);
        assert_eq!(&colors[3..6], &s.top);
    }

    #[test]
    fn axis_selects_coordinate() {
        let s = stops();
        // Same point, different axes: y is at the domain bottom, z at the top.
        let positions = [[0.0, -5.0, 10.0]];
        let by_y = synthesize(&positions, HeightAxis::Y, DOMAIN, &s);
        let by_z = synthesize(&positions, HeightAxis::Z, DOMAIN, &s);
        assert_eq!(&by_y[0..3], &s.bottom);
        assert_eq!(&by_z[0..3], &s.top);
    }

    #[test]
    fn out_of_domain_extrapolates() {
        // One unit below the domain minimum: t = -1/15, which extrapolates
        // past `bottom` on the green channel of the lower segment.
        let s = stops();
        let colors = synthesize(&[[0.0, -6.0, 0.0]], HeightAxis::Y, DOMAIN, &s);
        assert!(colors[1] < 0.0);
    }

    #[test]
    fn deterministic_for_same_input() {
        let positions: Vec<[f32; 3]> = (0..64)
            .map(|i| [i as f32 * 0.3, i as f32 * 0.5 - 5.0, 0.0])
            .collect();
        let a = synthesize(&positions, HeightAxis::Y, DOMAIN, &stops());
        let b = synthesize(&positions, HeightAxis::Y, DOMAIN, &stops());
        assert_eq!(a, b);
    }
}

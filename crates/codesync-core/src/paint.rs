//! # Paint Module
//!
//! Builds concrete canvas paints from IR fill descriptors.
//!
//! ## Responsibilities
//! - **Gradients**: Stop lists plus the unit-box affine for linear, radial and angular gradients.
//! - **Fill lists**: Order-preserving conversion of a fill list, dropping what cannot be built.

use crate::color::{parse_color, parse_optional_color};
use crate::types::{
    Color, ColorStop, GradientPaint, GradientTransform, Paint, Rgb, IDENTITY_TRANSFORM,
};
use codesync_ir::{FillSpec, GradientStop};
use kurbo::{Affine, Vec2};
use tracing::debug;

/// Angle used when a linear gradient does not specify one (top to bottom).
pub const DEFAULT_LINEAR_ANGLE: f64 = 180.0;

/// Stand-in for image fills until image upload is supported by the host seam.
pub const IMAGE_PLACEHOLDER: Rgb = Rgb {
    r: 0.9,
    g: 0.9,
    b: 0.9,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
}

/// Builds a gradient paint. Returns `None` when fewer than two stops are given.
pub fn build_gradient_paint(
    kind: GradientKind,
    angle: Option<f64>,
    stops: &[GradientStop],
) -> Option<Paint> {
    if stops.len() < 2 {
        return None;
    }

    let gradient_stops = stops
        .iter()
        .map(|stop| ColorStop {
            position: stop.position,
            color: parse_color(&stop.color).unwrap_or(Color::BLACK),
        })
        .collect();

    let paint = match kind {
        GradientKind::Linear => Paint::GradientLinear(GradientPaint {
            gradient_stops,
            gradient_transform: linear_gradient_transform(angle.unwrap_or(DEFAULT_LINEAR_ANGLE)),
        }),
        // Radial and angular gradients are not positioned yet; they always
        // fill the unit box with the identity transform.
        GradientKind::Radial => Paint::GradientRadial(GradientPaint {
            gradient_stops,
            gradient_transform: IDENTITY_TRANSFORM,
        }),
        GradientKind::Angular => Paint::GradientAngular(GradientPaint {
            gradient_stops,
            gradient_transform: IDENTITY_TRANSFORM,
        }),
    };
    Some(paint)
}

/// Unit-box transform for a CSS-style gradient angle in degrees.
///
/// The IR measures angles from the top; the canvas ramp runs along +x, so the
/// angle is shifted by -90° and the rotation is applied about the box centre.
pub fn linear_gradient_transform(angle_deg: f64) -> GradientTransform {
    let theta = angle_deg.to_radians() - std::f64::consts::FRAC_PI_2;
    let centre = Vec2::new(0.5, 0.5);
    let affine = Affine::translate(centre) * Affine::rotate(-theta) * Affine::translate(-centre);
    let [a, b, c, d, e, f] = affine.as_coeffs();
    [[a, c, e], [b, d, f]]
}

/// Converts one fill descriptor. `None` means "skip this fill".
pub fn build_paint(fill: &FillSpec) -> Option<Paint> {
    match fill {
        FillSpec::Solid { color } => {
            let color = parse_optional_color(color.as_deref())?;
            Some(Paint::solid(color.rgb(), color.a))
        }
        FillSpec::GradientLinear { angle, stops } => {
            build_gradient_paint(GradientKind::Linear, *angle, stops)
        }
        FillSpec::GradientRadial { stops } => build_gradient_paint(GradientKind::Radial, None, stops),
        FillSpec::GradientAngular { stops } => {
            build_gradient_paint(GradientKind::Angular, None, stops)
        }
        FillSpec::Image { .. } => Some(Paint::solid(IMAGE_PLACEHOLDER, 1.0)),
        FillSpec::Unsupported => None,
    }
}

/// Maps an ordered fill list onto paints, preserving order and dropping unbuildable entries.
pub fn build_fills(fills: &[FillSpec]) -> Vec<Paint> {
    fills
        .iter()
        .filter_map(|fill| {
            let paint = build_paint(fill);
            if paint.is_none() {
                debug!(?fill, "dropping fill that could not be built");
            }
            paint
        })
        .collect()
}

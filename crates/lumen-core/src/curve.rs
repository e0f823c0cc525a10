//! Tone curves: Catmull-Rom interpolation over user control points.
//!
//! Coordinates are always in byte units (0 to 255) no matter which domain the
//! rest of the pipeline works in. A curve is valid when it has at least two
//! points with finite coordinates and strictly increasing x.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lut::Lut;

/// Largest coordinate a control point can take.
pub const CURVE_MAX: f32 = 255.0;

// ============================================================================
// Curve Types
// ============================================================================

/// A point on a tone curve, in byte units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Input value (0 to 255)
    pub x: f32,
    /// Output value (0 to 255)
    pub y: f32,
}

impl CurvePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn clamped(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, CURVE_MAX),
            y: y.clamp(0.0, CURVE_MAX),
        }
    }
}

/// Tone curve with control points sorted by x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneCurve {
    pub points: Vec<CurvePoint>,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self {
            points: vec![CurvePoint::new(0.0, 0.0), CurvePoint::new(CURVE_MAX, CURVE_MAX)],
        }
    }
}

impl ToneCurve {
    /// Create the identity curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curve from points, validating them.
    pub fn from_points(points: Vec<CurvePoint>) -> Result<Self> {
        let curve = Self { points };
        curve.validate()?;
        Ok(curve)
    }

    /// Check point count, finiteness and strictly increasing x.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(Error::MalformedCurve(format!(
                "at least 2 points required, got {}",
                self.points.len()
            )));
        }
        if self
            .points
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(Error::MalformedCurve(
                "coordinates must be finite".to_string(),
            ));
        }
        if self.points.windows(2).any(|w| w[1].x <= w[0].x) {
            return Err(Error::MalformedCurve(
                "x values must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    /// True for exactly the two points (0, 0) and (255, 255).
    ///
    /// Catmull-Rom through those two points is not the straight line, so
    /// identity is defined by the points rather than by the evaluated shape.
    pub fn is_identity(&self) -> bool {
        self.points.len() == 2
            && self.points[0] == CurvePoint::new(0.0, 0.0)
            && self.points[1] == CurvePoint::new(CURVE_MAX, CURVE_MAX)
    }

    /// Evaluate the curve at `x` (byte units).
    ///
    /// Inputs left of the first point return its y and inputs right of the
    /// last point return its y. The result is clamped to `[0, 255]`.
    /// The curve must be valid.
    pub fn evaluate(&self, x: f32) -> f32 {
        let points = &self.points;
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return x.clamp(0.0, CURVE_MAX),
        };
        if x <= first.x {
            return first.y.clamp(0.0, CURVE_MAX);
        }
        if x >= last.x {
            return last.y.clamp(0.0, CURVE_MAX);
        }

        let i = find_segment(points, x);
        let p1 = points[i];
        let p2 = points[i + 1];
        let p0 = if i > 0 { points[i - 1] } else { p1 };
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let span = p2.x - p1.x;
        let t = if span > 0.0 { (x - p1.x) / span } else { 0.0 };
        catmull_rom(p0.y, p1.y, p2.y, p3.y, t).clamp(0.0, CURVE_MAX)
    }

    /// Build a 256-entry byte table by evaluating every integer input.
    pub fn build_lut(&self) -> Result<Lut> {
        self.validate()?;
        if self.is_identity() {
            return Ok(Lut::identity());
        }
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = self.evaluate(i as f32).round() as u8;
        }
        Ok(Lut::from_table(table))
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Insert a point, keeping x sorted. Returns the new point's index.
    ///
    /// Coordinates are clamped to `[0, 255]`. Fails if a point already has
    /// this x.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<usize> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::MalformedCurve(
                "coordinates must be finite".to_string(),
            ));
        }
        let point = CurvePoint::clamped(x, y);
        let index = self.points.partition_point(|p| p.x < point.x);
        if self.points.get(index).is_some_and(|p| p.x == point.x) {
            return Err(Error::MalformedCurve(format!(
                "a point already exists at x = {}",
                point.x
            )));
        }
        self.points.insert(index, point);
        Ok(index)
    }

    /// Move the point at `index`. It must stay strictly between its neighbors.
    pub fn move_point(&mut self, index: usize, x: f32, y: f32) -> Result<()> {
        if index >= self.points.len() {
            return Err(Error::MalformedCurve(format!(
                "point index {} out of range",
                index
            )));
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::MalformedCurve(
                "coordinates must be finite".to_string(),
            ));
        }
        let point = CurvePoint::clamped(x, y);
        let after_prev = index == 0 || self.points[index - 1].x < point.x;
        let before_next = self
            .points
            .get(index + 1)
            .map_or(true, |next| point.x < next.x);
        if !after_prev || !before_next {
            return Err(Error::MalformedCurve(
                "moved point would break x ordering".to_string(),
            ));
        }
        self.points[index] = point;
        Ok(())
    }

    /// Remove the point at `index`. A curve always keeps two points.
    pub fn remove_point(&mut self, index: usize) -> Result<CurvePoint> {
        if index >= self.points.len() {
            return Err(Error::MalformedCurve(format!(
                "point index {} out of range",
                index
            )));
        }
        if self.points.len() <= 2 {
            return Err(Error::MalformedCurve(
                "a curve needs at least 2 points".to_string(),
            ));
        }
        Ok(self.points.remove(index))
    }
}

// ============================================================================
// Interpolation
// ============================================================================

/// Index of the segment `[points[i].x, points[i + 1].x)` containing `x`.
fn find_segment(points: &[CurvePoint], x: f32) -> usize {
    let upper = points.partition_point(|p| p.x <= x);
    upper.saturating_sub(1).min(points.len().saturating_sub(2))
}

/// Uniform Catmull-Rom between `p1` and `p2`.
#[inline]
fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

// ============================================================================
// Normalized Tables
// ============================================================================

/// A curve sampled at every byte value, stored normalized for the pipeline.
///
/// Non-integer inputs are linearly interpolated between neighboring entries.
#[derive(Debug, Clone)]
pub struct CurveTable {
    values: [f32; 256],
}

impl CurveTable {
    /// Sample a valid curve. Returns `None` for the identity curve.
    pub fn from_curve(curve: &ToneCurve) -> Result<Option<Self>> {
        curve.validate()?;
        if curve.is_identity() {
            return Ok(None);
        }
        let mut values = [0.0f32; 256];
        for (i, v) in values.iter_mut().enumerate() {
            *v = curve.evaluate(i as f32) / CURVE_MAX;
        }
        Ok(Some(Self { values }))
    }

    /// Map a normalized channel value through the table.
    #[inline]
    pub fn sample(&self, v: f32) -> f32 {
        let x = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) } * CURVE_MAX;
        let i = (x.floor() as usize).min(254);
        let frac = x - i as f32;
        self.values[i] + (self.values[i + 1] - self.values[i]) * frac
    }
}

/// Precomputed tables for all four curves of a settings value.
#[derive(Debug, Clone)]
pub struct CurveTables {
    pub rgb: Option<CurveTable>,
    pub red: Option<CurveTable>,
    pub green: Option<CurveTable>,
    pub blue: Option<CurveTable>,
}

impl CurveTables {
    /// Validate and sample every curve.
    pub fn new(curves: &crate::settings::CurveSettings) -> Result<Self> {
        Ok(Self {
            rgb: CurveTable::from_curve(&curves.rgb)?,
            red: CurveTable::from_curve(&curves.red)?,
            green: CurveTable::from_curve(&curves.green)?,
            blue: CurveTable::from_curve(&curves.blue)?,
        })
    }

    /// True when every curve is the identity.
    pub fn is_identity(&self) -> bool {
        self.rgb.is_none() && self.red.is_none() && self.green.is_none() && self.blue.is_none()
    }

    /// Channel curves first, then the master curve.
    #[inline]
    pub fn apply(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let pass = |table: &Option<CurveTable>, v: f32| match table {
            Some(t) => t.sample(v),
            None => v,
        };
        let (r, g, b) = (pass(&self.red, r), pass(&self.green, g), pass(&self.blue, b));
        (pass(&self.rgb, r), pass(&self.rgb, g), pass(&self.rgb, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s_curve() -> ToneCurve {
        ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(64.0, 40.0),
            CurvePoint::new(192.0, 215.0),
            CurvePoint::new(255.0, 255.0),
        ])
        .unwrap()
    }

    // ===== Validation Tests =====

    #[test]
    fn test_default_is_identity() {
        let curve = ToneCurve::new();
        assert!(curve.is_identity());
        assert!(curve.validate().is_ok());
    }

    #[test]
    fn test_too_few_points_rejected() {
        let result = ToneCurve::from_points(vec![CurvePoint::new(0.0, 0.0)]);
        assert!(matches!(result, Err(Error::MalformedCurve(_))));
        assert!(ToneCurve::from_points(vec![]).is_err());
    }

    #[test]
    fn test_non_monotonic_rejected() {
        let result = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(128.0, 100.0),
            CurvePoint::new(100.0, 150.0),
            CurvePoint::new(255.0, 255.0),
        ]);
        assert!(matches!(result, Err(Error::MalformedCurve(_))));

        // Duplicate x is also malformed
        let result = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(0.0, 10.0),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, f32::NAN),
            CurvePoint::new(255.0, 255.0),
        ]);
        assert!(result.is_err());
    }

    // ===== Evaluation Tests =====

    #[test]
    fn test_passes_through_control_points() {
        let curve = s_curve();
        for p in &curve.points {
            assert!((curve.evaluate(p.x) - p.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = ToneCurve::from_points(vec![
            CurvePoint::new(30.0, 50.0),
            CurvePoint::new(220.0, 200.0),
        ])
        .unwrap();
        assert_eq!(curve.evaluate(0.0), 50.0);
        assert_eq!(curve.evaluate(10.0), 50.0);
        assert_eq!(curve.evaluate(240.0), 200.0);
        assert_eq!(curve.evaluate(255.0), 200.0);
    }

    #[test]
    fn test_s_curve_shape() {
        let curve = s_curve();
        assert!(curve.evaluate(64.0) < 64.0);
        assert!(curve.evaluate(192.0) > 192.0);
    }

    #[test]
    fn test_overshoot_clamped() {
        let curve = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 0.0),
            CurvePoint::new(10.0, 255.0),
            CurvePoint::new(20.0, 0.0),
            CurvePoint::new(255.0, 255.0),
        ])
        .unwrap();
        for x in 0..=255 {
            let y = curve.evaluate(x as f32);
            assert!((0.0..=255.0).contains(&y));
        }
    }

    #[test]
    fn test_find_segment() {
        let curve = s_curve();
        assert_eq!(find_segment(&curve.points, 0.0), 0);
        assert_eq!(find_segment(&curve.points, 63.9), 0);
        assert_eq!(find_segment(&curve.points, 64.0), 1);
        assert_eq!(find_segment(&curve.points, 200.0), 2);
    }

    // ===== LUT Tests =====

    #[test]
    fn test_identity_curve_builds_identity_lut() {
        let lut = ToneCurve::new().build_lut().unwrap();
        assert!(lut.is_identity());
    }

    #[test]
    fn test_lut_matches_evaluate() {
        let curve = s_curve();
        let lut = curve.build_lut().unwrap();
        for i in [0u8, 32, 64, 100, 128, 192, 255] {
            assert_eq!(lut.get(i), curve.evaluate(i as f32).round() as u8);
        }
    }

    #[test]
    fn test_build_lut_rejects_malformed() {
        let curve = ToneCurve {
            points: vec![CurvePoint::new(5.0, 5.0)],
        };
        assert!(curve.build_lut().is_err());
    }

    #[test]
    fn test_curve_table_identity_is_none() {
        assert!(CurveTable::from_curve(&ToneCurve::new()).unwrap().is_none());
    }

    #[test]
    fn test_curve_table_samples_integers_exactly() {
        let curve = s_curve();
        let table = CurveTable::from_curve(&curve).unwrap().unwrap();
        for i in [0u32, 64, 128, 192, 255] {
            let v = table.sample(i as f32 / 255.0);
            assert!((v * 255.0 - curve.evaluate(i as f32)).abs() < 1e-3);
        }
        // Out-of-range inputs clamp to the ends
        assert_eq!(table.sample(-0.5), table.sample(0.0));
        assert_eq!(table.sample(1.5), table.sample(1.0));
    }

    #[test]
    fn test_channel_curve_before_master() {
        // Red curve lifts 0 to 100; master maps 100 back down to 0
        let mut settings = crate::settings::CurveSettings::default();
        settings.red = ToneCurve::from_points(vec![
            CurvePoint::new(0.0, 100.0),
            CurvePoint::new(255.0, 255.0),
        ])
        .unwrap();
        settings.rgb = ToneCurve::from_points(vec![
            CurvePoint::new(100.0, 0.0),
            CurvePoint::new(255.0, 255.0),
        ])
        .unwrap();
        let tables = CurveTables::new(&settings).unwrap();
        let (r, _, _) = tables.apply(0.0, 0.0, 0.0);
        assert!(r.abs() < 1e-6, "got {}", r);
    }

    // ===== Editing Tests =====

    #[test]
    fn test_add_point_sorted() {
        let mut curve = ToneCurve::new();
        let index = curve.add_point(128.0, 150.0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(curve.points.len(), 3);
        assert!(curve.validate().is_ok());
        assert!(!curve.is_identity());

        let index = curve.add_point(60.0, 40.0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(curve.points[2].x, 128.0);
    }

    #[test]
    fn test_add_duplicate_x_rejected() {
        let mut curve = ToneCurve::new();
        assert!(curve.add_point(255.0, 10.0).is_err());
        // Clamped to 255, which already exists
        assert!(curve.add_point(400.0, 10.0).is_err());
        assert_eq!(curve.points.len(), 2);
    }

    #[test]
    fn test_move_point_keeps_order() {
        let mut curve = s_curve();
        assert!(curve.move_point(1, 100.0, 80.0).is_ok());
        assert_eq!(curve.points[1], CurvePoint::new(100.0, 80.0));

        // Past the next point
        assert!(curve.move_point(1, 200.0, 80.0).is_err());
        // Onto the previous point
        assert!(curve.move_point(1, 0.0, 80.0).is_err());
        assert!(curve.move_point(9, 10.0, 10.0).is_err());
        assert!(curve.validate().is_ok());
    }

    #[test]
    fn test_remove_point_keeps_two() {
        let mut curve = s_curve();
        let removed = curve.remove_point(1).unwrap();
        assert_eq!(removed.x, 64.0);
        curve.remove_point(1).unwrap();
        assert_eq!(curve.points.len(), 2);
        assert!(curve.remove_point(0).is_err());
        assert!(curve.remove_point(5).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let curve = s_curve();
        let json = serde_json::to_string(&curve).unwrap();
        let back: ToneCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, curve);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_curve() -> impl Strategy<Value = ToneCurve> {
        proptest::collection::btree_set(0u8..=255, 2..8).prop_flat_map(|xs| {
            let n = xs.len();
            proptest::collection::vec(0.0f32..=255.0, n).prop_map(move |ys| {
                let points = xs
                    .iter()
                    .zip(ys)
                    .map(|(&x, y)| CurvePoint::new(x as f32, y))
                    .collect();
                ToneCurve { points }
            })
        })
    }

    proptest! {
        /// Property: inputs outside the control range return the end values.
        #[test]
        fn prop_endpoint_clamp(curve in arb_curve(), below in 0.0f32..1.0, above in 0.0f32..1.0) {
            let first = curve.points[0];
            let last = curve.points[curve.points.len() - 1];
            let x_below = first.x * below;
            let x_above = last.x + (255.0 - last.x) * above;
            prop_assert_eq!(curve.evaluate(x_below), first.y);
            prop_assert_eq!(curve.evaluate(x_above), last.y);
            prop_assert_eq!(curve.evaluate(-10.0), first.y);
            prop_assert_eq!(curve.evaluate(300.0), last.y);
        }

        /// Property: every evaluation lands in [0, 255].
        #[test]
        fn prop_output_in_range(curve in arb_curve(), x in -50.0f32..300.0) {
            let y = curve.evaluate(x);
            prop_assert!((0.0..=255.0).contains(&y));
        }
    }
}

//! Easing functions for animation interpolation.
//!
//! Provides the easing curves used by every animated component: camera
//! waypoints, frame callbacks, overlay blends, and label fades. All
//! functions map `t ∈ [0, 1]` to an eased value with `f(0) = 0` and
//! `f(1) = 1`.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Quadratic ease-in (slow start, fast end): `t²`.
    EaseIn,
    /// Quadratic ease-out (fast start, slow end): `t(2-t)`.
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
    /// Cubic ease-in: `t³`.
    EaseInCubic,
    /// Cubic ease-out.
    EaseOutCubic,
    /// Cubic ease-in-out.
    EaseInOutCubic,
    /// Quartic ease-in: `t⁴`.
    EaseInQuart,
    /// Quartic ease-out.
    EaseOutQuart,
    /// Quartic ease-in-out.
    EaseInOutQuart,
    /// Sinusoidal ease-in.
    EaseInSine,
    /// Sinusoidal ease-out.
    EaseOutSine,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
}

impl Easing {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Returns the eased value, also in
    /// [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => {
                let u = t - 1.0;
                1.0 - u * u * u * u
            }
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    let u = t - 1.0;
                    1.0 - 8.0 * u * u * u * u
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Look up an easing by its config name (e.g. `"easeInOutCubic"`).
    ///
    /// Unknown names fall back to [`Easing::Linear`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "easeIn" => Easing::EaseIn,
            "easeOut" => Easing::EaseOut,
            "easeInOut" => Easing::EaseInOut,
            "easeInCubic" => Easing::EaseInCubic,
            "easeOutCubic" => Easing::EaseOutCubic,
            "easeInOutCubic" => Easing::EaseInOutCubic,
            "easeInQuart" => Easing::EaseInQuart,
            "easeOutQuart" => Easing::EaseOutQuart,
            "easeInOutQuart" => Easing::EaseInOutQuart,
            "easeInSine" => Easing::EaseInSine,
            "easeOutSine" => Easing::EaseOutSine,
            "easeInOutSine" => Easing::EaseInOutSine,
            _ => Easing::Linear,
        }
    }

    /// All variants, for exhaustive property tests.
    #[must_use]
    pub fn all() -> [Easing; 13] {
        [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseInCubic,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::EaseInQuart,
            Easing::EaseOutQuart,
            Easing::EaseInOutQuart,
            Easing::EaseInSine,
            Easing::EaseOutSine,
            Easing::EaseInOutSine,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_law() {
        // f(0) = 0 and f(1) = 1 for every easing function.
        for easing in Easing::all() {
            assert!(
                easing.evaluate(0.0).abs() < 1e-9,
                "{easing:?} f(0) != 0"
            );
            assert!(
                (easing.evaluate(1.0) - 1.0).abs() < 1e-9,
                "{easing:?} f(1) != 1"
            );
        }
    }

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(Easing::Linear.evaluate(0.5), 0.5);
    }

    #[test]
    fn test_quadratic_pair() {
        assert_eq!(Easing::EaseIn.evaluate(0.5), 0.25);
        assert_eq!(Easing::EaseOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_ease_in_out_halves() {
        // 2t² below the midpoint, -1+(4-2t)t above.
        assert_eq!(Easing::EaseInOut.evaluate(0.25), 0.125);
        assert_eq!(Easing::EaseInOut.evaluate(0.75), 0.875);
        assert_eq!(Easing::EaseInOut.evaluate(0.5), 0.5);
    }

    #[test]
    fn test_cubic_out() {
        let v = Easing::EaseOutCubic.evaluate(0.5);
        assert!((v - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_sine_midpoints() {
        let v = Easing::EaseInOutSine.evaluate(0.5);
        assert!((v - 0.5).abs() < 1e-6);
        let v = Easing::EaseOutSine.evaluate(0.5);
        assert!((v - (std::f32::consts::FRAC_PI_4).sin()).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        for easing in Easing::all() {
            assert_eq!(easing.evaluate(-0.5), easing.evaluate(0.0));
            assert_eq!(easing.evaluate(1.5), easing.evaluate(1.0));
        }
    }

    #[test]
    fn test_monotonic_on_samples() {
        // Every curve is non-decreasing over [0, 1].
        for easing in Easing::all() {
            let mut prev = easing.evaluate(0.0);
            for i in 1..=100 {
                let v = easing.evaluate(i as f32 / 100.0);
                assert!(
                    v >= prev - 1e-6,
                    "{easing:?} decreased at sample {i}"
                );
                prev = v;
            }
        }
    }

    #[test]
    fn test_from_name_fallback() {
        assert_eq!(Easing::from_name("easeInOutCubic"), Easing::EaseInOutCubic);
        assert_eq!(Easing::from_name("bounce"), Easing::Linear);
        assert_eq!(Easing::from_name(""), Easing::Linear);
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&Easing::EaseInOutQuart).unwrap();
        assert_eq!(json, "\"easeInOutQuart\"");
        let back: Easing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Easing::EaseInOutQuart);
    }
}

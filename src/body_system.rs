//! Body-system seed data consumed by the transition engine.
//!
//! The engine animates *between* systems; the systems themselves (organ
//! lists, anatomical relationships, Polish naming) are supplied by the
//! caller. Only the fields the engine reads are modeled here.

use serde::{Deserialize, Serialize};

/// One organ belonging to a body system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organ {
    /// Stable identifier, e.g. `"heart"`.
    pub id: String,
    /// English display name.
    pub name: String,
    /// Polish display name.
    pub polish_name: String,
}

/// An anatomical body system (cardiovascular, nervous, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodySystem {
    /// Stable identifier, e.g. `"cardiovascular"`.
    pub id: String,
    /// English display name.
    pub name: String,
    /// Polish display name, e.g. `"Układ sercowo-naczyniowy"`.
    pub polish_name: String,
    /// Names of anatomical relationships this system participates in.
    /// Two systems sharing an entry are considered connected.
    pub connections: Vec<String>,
    /// Organs belonging to this system, most significant first.
    pub organs: Vec<Organ>,
}

impl BodySystem {
    /// Highlight color for this system, keyed by its Polish name.
    #[must_use]
    pub fn color(&self) -> [f32; 3] {
        system_color(&self.polish_name)
    }
}

/// RGB highlight color for a body system, keyed by Polish name.
/// Unknown systems render white.
#[must_use]
pub fn system_color(polish_name: &str) -> [f32; 3] {
    match polish_name {
        "Układ sercowo-naczyniowy" => [1.0, 0.0, 0.502],
        "Układ pokarmowy" | "Układ mięśniowy" => [1.0, 0.502, 0.0],
        "Układ nerwowy" => [1.0, 1.0, 0.0],
        "Układ hormonalny" => [0.0, 1.0, 1.0],
        "Układ odpornościowy" => [0.0, 1.0, 0.0],
        "Układ oddechowy" => [0.502, 1.0, 0.502],
        "Układ limfatyczny" => [1.0, 0.502, 1.0],
        "Układ moczowy" => [0.502, 0.502, 1.0],
        "Układ rozrodczy" => [1.0, 0.502, 0.502],
        "Układ powłokowy" => [0.502, 1.0, 1.0],
        "Układ endokannabinoidowy" => [0.502, 0.0, 1.0],
        _ => [1.0, 1.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_system(id: &str, polish_name: &str) -> BodySystem {
        BodySystem {
            id: id.to_owned(),
            name: id.to_owned(),
            polish_name: polish_name.to_owned(),
            connections: vec!["vascular supply".to_owned()],
            organs: vec![Organ {
                id: format!("{id}-organ"),
                name: "organ".to_owned(),
                polish_name: "narząd".to_owned(),
            }],
        }
    }

    #[test]
    fn test_known_system_colors() {
        assert_eq!(system_color("Układ nerwowy"), [1.0, 1.0, 0.0]);
        assert_eq!(
            system_color("Układ sercowo-naczyniowy"),
            [1.0, 0.0, 0.502]
        );
    }

    #[test]
    fn test_unknown_system_is_white() {
        assert_eq!(system_color("Układ tajemniczy"), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_system_color_method() {
        let sys = test_system("nervous", "Układ nerwowy");
        assert_eq!(sys.color(), [1.0, 1.0, 0.0]);
    }
}

//! Garage car preview
//!
//! The preview is plain page markup; this picks the colours each part shows.

use game_core::{Body, CarConfig, Chip, Tyre};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarPreview {
    pub body: &'static str,
    pub tyres: &'static str,
    pub chip: &'static str,
    pub glow: String,
}

impl CarPreview {
    pub fn for_car(car: &CarConfig) -> Self {
        let body = match car.body {
            Body::Lightweight => "#3b82f6",
            Body::Balanced => "#9333ea",
            Body::Heavy => "#b91c1c",
        };
        let tyres = match car.tyres {
            Tyre::Sport => "#374151",
            Tyre::Racing => "#dc2626",
            Tyre::Drift => "#ca8a04",
        };
        let chip = match car.chips {
            Chip::Nitro => "#c084fc",
            Chip::Turbo => "#fb923c",
            Chip::Handling => "#4ade80",
        };
        Self {
            body,
            tyres,
            chip,
            glow: car.lights.clone(),
        }
    }

    /// `(element id, inline style)` pairs for the page
    pub fn styles(&self) -> Vec<(&'static str, String)> {
        let mut styles = vec![
            ("preview-body", format!("background: {};", self.body)),
            ("preview-glow", format!("background: {};", self.glow)),
            ("preview-chip", format!("background: {};", self.chip)),
        ];
        for wheel in ["preview-wheel-fl", "preview-wheel-fr", "preview-wheel-rl", "preview-wheel-rr"] {
            styles.push((wheel, format!("background: {};", self.tyres)));
        }
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Part;

    #[test]
    fn test_default_build_preview() {
        let preview = CarPreview::for_car(&CarConfig::new("car_1"));
        assert_eq!(preview.body, "#9333ea");
        assert_eq!(preview.tyres, "#374151");
        assert_eq!(preview.chip, "#c084fc");
        assert_eq!(preview.glow, "#00ffff");
    }

    #[test]
    fn test_preview_tracks_parts() {
        let mut car = CarConfig::new("car_1");
        car.apply(Part::Tyres(Tyre::Drift));
        car.apply(Part::Body(Body::Heavy));
        car.apply(Part::Chips(Chip::Turbo));
        car.set_lights("#ff00ff");

        let preview = CarPreview::for_car(&car);
        assert_eq!(preview.body, "#b91c1c");
        assert_eq!(preview.tyres, "#ca8a04");
        assert_eq!(preview.chip, "#fb923c");

        let styles = preview.styles();
        assert_eq!(styles.len(), 7);
        assert!(styles.contains(&("preview-glow", "background: #ff00ff;".to_string())));
        assert!(styles
            .iter()
            .filter(|(id, _)| id.starts_with("preview-wheel"))
            .all(|(_, style)| style == "background: #ca8a04;"));
    }
}

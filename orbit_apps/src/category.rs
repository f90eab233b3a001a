//! The cooking category picker: a ring of labeled circles, pre-expanded
//! and animating out from the center at startup.

use orbit_ui::circle::AppCircle;
use orbit_ui::geom::Point;
use orbit_ui::layout::build_ring;

/// Categories shown by the picker.
pub const CATEGORIES: [&str; 5] = ["Lamb", "Beef", "Pasta", "Seafood", "Mince"];

const CIRCLE_RADIUS: f32 = 85.0;
const DISTRIBUTION_RADIUS: f32 = 250.0;

/// A ring of category circles.  Unlike the home screen there is no primary
/// circle and every member is visible immediately, animating outward from
/// the center when the wheel is created.
pub struct CategoryWheel {
    circles: Vec<AppCircle>,
}

impl CategoryWheel {
    pub fn new(center: Point, now: f64) -> Self {
        let anchors = build_ring(center, DISTRIBUTION_RADIUS, CATEGORIES.len());
        let circles = CATEGORIES
            .iter()
            .zip(anchors)
            .enumerate()
            .map(|(i, (label, anchor))| {
                let mut c = AppCircle::new(center, CIRCLE_RADIUS, i + 1, anchor, false);
                c.label = label.to_string();
                c.begin_transition(true, now);
                c
            })
            .collect();
        CategoryWheel { circles }
    }

    pub fn circles(&self) -> &[AppCircle] {
        &self.circles
    }

    pub fn circles_mut(&mut self) -> &mut [AppCircle] {
        &mut self.circles
    }

    /// The label picked by a confirmed hover, if any.  `hovered` is an
    /// index into the wheel's circle slice, as produced by
    /// `orbit_ui::gesture::read_hand` over [`CategoryWheel::circles_mut`].
    pub fn pick(&self, hovered: Option<usize>, pinched: bool) -> Option<&str> {
        if !pinched {
            return None;
        }
        hovered
            .and_then(|i| self.circles.get(i))
            .map(|c| c.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_ui::circle::ANIMATION_DURATION;

    #[test]
    fn wheel_has_one_circle_per_category() {
        let wheel = CategoryWheel::new(Point::new(960.0, 540.0), 0.0);
        assert_eq!(wheel.circles().len(), CATEGORIES.len());
        for (c, label) in wheel.circles().iter().zip(CATEGORIES) {
            assert_eq!(c.label, label);
            assert!(!c.is_primary);
            assert!(c.is_visible(), "wheel members are visible from creation");
        }
    }

    #[test]
    fn wheel_animates_out_from_center() {
        let mut wheel = CategoryWheel::new(Point::new(960.0, 540.0), 0.0);
        for c in wheel.circles_mut() {
            assert!(!c.is_resting());
            let rs = c.update(ANIMATION_DURATION + 0.1);
            assert_eq!(rs.center, c.final_pos);
        }
    }

    #[test]
    fn pick_requires_pinch_and_hover() {
        let wheel = CategoryWheel::new(Point::new(960.0, 540.0), 0.0);
        assert_eq!(wheel.pick(Some(0), false), None);
        assert_eq!(wheel.pick(None, true), None);
        assert_eq!(wheel.pick(Some(2), true), Some("Pasta"));
    }
}

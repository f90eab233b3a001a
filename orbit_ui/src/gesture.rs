//! Hand-landmark interpretation: cursor extraction, pinch detection, and
//! hover bookkeeping across the circle set.
//!
//! Input is one landmark collection per tracked hand, already transformed
//! into screen space by whatever camera pipeline is in front of us.  Zero
//! hands in a frame is a normal empty event, never an error.

use crate::circle::AppCircle;
use crate::geom::Point;

/// Pixel distance between thumb tip and index fingertip below which the
/// hand counts as pinched.  Tuned for 1920×1080; rescale for other
/// resolutions.
pub const PINCH_THRESHOLD: f32 = 100.0;

/// Landmark index of the thumb tip (MediaPipe hand numbering).
pub const THUMB_TIP: usize = 4;

/// Landmark index of the index fingertip (MediaPipe hand numbering).
pub const INDEX_FINGER_TIP: usize = 8;

/// Number of landmarks in a full hand collection.
pub const LANDMARKS_PER_HAND: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Hand
// ════════════════════════════════════════════════════════════════════════════

/// One tracked hand: landmark positions in screen pixels.
#[derive(Clone, Debug, Default)]
pub struct Hand {
    pub landmarks: Vec<Point>,
}

impl Hand {
    /// A hand carrying only the two landmarks the interpreter reads,
    /// padded to the full collection size.
    pub fn from_tips(index_tip: Point, thumb_tip: Point) -> Self {
        let mut landmarks = vec![Point::default(); LANDMARKS_PER_HAND];
        landmarks[INDEX_FINGER_TIP] = index_tip;
        landmarks[THUMB_TIP] = thumb_tip;
        Hand { landmarks }
    }

    pub fn index_tip(&self) -> Option<Point> {
        self.landmarks.get(INDEX_FINGER_TIP).copied()
    }

    pub fn thumb_tip(&self) -> Option<Point> {
        self.landmarks.get(THUMB_TIP).copied()
    }
}

/// What one hand means this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Index fingertip position — the on-screen cursor.
    pub cursor: Point,
    /// First circle (iteration order) containing the cursor, if any.
    pub hovered: Option<usize>,
    /// Thumb–index distance below the pinch threshold.
    pub pinched: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Interpretation
// ════════════════════════════════════════════════════════════════════════════

/// Clear the per-frame hover flags.  Call once at the top of every frame;
/// `hover_started` timestamps survive so continuous hover keeps growing.
pub fn clear_hover(circles: &mut [AppCircle]) {
    for c in circles {
        c.is_hovered = false;
    }
}

/// Interpret one hand against the circle set.
///
/// Marks hovered circles, starts their hover timers on entry, and clears
/// timers on exit, but only for currently visible non-primary circles.
/// The primary circle's timer is never reset here; see DESIGN.md for why
/// that asymmetry is kept.
///
/// Returns `None` for a malformed landmark collection.
pub fn read_hand(
    hand: &Hand,
    circles: &mut [AppCircle],
    pinch_threshold: f32,
    now: f64,
) -> Option<Pointer> {
    let cursor = hand.index_tip()?;
    let thumb = hand.thumb_tip()?;

    let mut hovered = None;
    for (i, circle) in circles.iter_mut().enumerate() {
        if circle.is_hovered_at(cursor) {
            circle.is_hovered = true;
            if circle.hover_started.is_none() {
                circle.hover_started = Some(now);
            }
            if hovered.is_none() {
                hovered = Some(i);
            }
        } else if !circle.is_primary && circle.is_visible() {
            circle.hover_started = None;
        }
    }

    Some(Pointer {
        cursor,
        hovered,
        pinched: cursor.distance(thumb) < pinch_threshold,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::make_circles;

    fn circles() -> Vec<AppCircle> {
        make_circles(Point::new(960.0, 540.0), 8, 100.0, 75.0, 250.0)
    }

    fn hand_at(cursor: Point, pinched: bool) -> Hand {
        let thumb = if pinched {
            cursor
        } else {
            Point::new(cursor.x + 400.0, cursor.y)
        };
        Hand::from_tips(cursor, thumb)
    }

    #[test]
    fn pinch_respects_threshold() {
        let mut cs = circles();
        let open = Hand::from_tips(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let shut = Hand::from_tips(Point::new(0.0, 0.0), Point::new(99.9, 0.0));
        let p1 = read_hand(&open, &mut cs, PINCH_THRESHOLD, 0.0).unwrap();
        let p2 = read_hand(&shut, &mut cs, PINCH_THRESHOLD, 0.0).unwrap();
        assert!(!p1.pinched, "distance == threshold is not a pinch");
        assert!(p2.pinched);
    }

    #[test]
    fn hover_marks_first_circle_and_starts_timer() {
        let mut cs = circles();
        let hand = hand_at(Point::new(960.0, 540.0), false);
        let p = read_hand(&hand, &mut cs, PINCH_THRESHOLD, 3.0).unwrap();
        assert_eq!(p.hovered, Some(0));
        assert!(cs[0].is_hovered);
        assert_eq!(cs[0].hover_started, Some(3.0));
    }

    #[test]
    fn hover_timer_not_restarted_while_held() {
        let mut cs = circles();
        let hand = hand_at(Point::new(960.0, 540.0), false);
        read_hand(&hand, &mut cs, PINCH_THRESHOLD, 3.0).unwrap();
        read_hand(&hand, &mut cs, PINCH_THRESHOLD, 4.0).unwrap();
        assert_eq!(cs[0].hover_started, Some(3.0));
    }

    #[test]
    fn hover_exit_resets_only_visible_ring_members() {
        let mut cs = circles();
        // Expand the ring and land it so members are visible and resting.
        for c in cs.iter_mut().filter(|c| !c.is_primary) {
            c.begin_transition(true, 0.0);
            c.update(10.0);
        }
        // Hover ring member 1 (at its anchor), then move away.
        let anchor = cs[1].final_pos;
        read_hand(&hand_at(anchor, false), &mut cs, PINCH_THRESHOLD, 11.0).unwrap();
        assert_eq!(cs[1].hover_started, Some(11.0));
        read_hand(
            &hand_at(Point::new(10.0, 10.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            12.0,
        )
        .unwrap();
        assert_eq!(cs[1].hover_started, None, "visible ring member resets");
    }

    #[test]
    fn primary_hover_timer_survives_hover_exit() {
        // Hover exit never clears the primary circle's timer.  Kept as-is,
        // flagged as a revision candidate in DESIGN.md.
        let mut cs = circles();
        read_hand(
            &hand_at(Point::new(960.0, 540.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            1.0,
        )
        .unwrap();
        assert_eq!(cs[0].hover_started, Some(1.0));
        read_hand(
            &hand_at(Point::new(10.0, 10.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            2.0,
        )
        .unwrap();
        assert_eq!(cs[0].hover_started, Some(1.0));
    }

    #[test]
    fn hidden_ring_member_keeps_timer_on_exit() {
        let mut cs = circles();
        // All ring members are hidden and parked at center under the
        // primary; hover the center then leave.
        read_hand(
            &hand_at(Point::new(960.0, 540.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            1.0,
        )
        .unwrap();
        assert_eq!(cs[1].hover_started, Some(1.0));
        read_hand(
            &hand_at(Point::new(10.0, 10.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            2.0,
        )
        .unwrap();
        assert_eq!(cs[1].hover_started, Some(1.0), "hidden members keep timers");
    }

    #[test]
    fn malformed_hand_is_a_no_op() {
        let mut cs = circles();
        let stub = Hand {
            landmarks: vec![Point::default(); 3],
        };
        assert!(read_hand(&stub, &mut cs, PINCH_THRESHOLD, 0.0).is_none());
        assert!(cs.iter().all(|c| !c.is_hovered));
    }

    #[test]
    fn clear_hover_keeps_timers() {
        let mut cs = circles();
        read_hand(
            &hand_at(Point::new(960.0, 540.0), false),
            &mut cs,
            PINCH_THRESHOLD,
            1.0,
        )
        .unwrap();
        clear_hover(&mut cs);
        assert!(!cs[0].is_hovered);
        assert_eq!(cs[0].hover_started, Some(1.0));
    }
}

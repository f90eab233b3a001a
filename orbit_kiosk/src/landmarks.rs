//! Landmark sources — where hand positions come from each frame.
//!
//! The controller only sees the [`LandmarkSource`] trait: `update()` says
//! whether a fresh landmark set arrived (a `false` frame is skipped
//! entirely, which is the camera pipeline's backpressure valve), and
//! `hands()` exposes the current screen-space landmark collections.
//!
//! Two implementations: a mouse-driven simulation (default) and a
//! LeapMotion-backed source behind the `leap` feature flag.

use std::sync::mpsc::Receiver;

use orbit_ui::geom::Point;
use orbit_ui::gesture::Hand;

/// One mouse reading forwarded by the visualizer each frame.
#[derive(Clone, Copy, Debug)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

/// Anything that can deliver per-frame hand landmark sets in screen space.
pub trait LandmarkSource {
    /// Pull the next landmark set.  Returns false when no new data is
    /// ready; the caller skips the frame.
    fn update(&mut self) -> bool;

    /// The hands seen by the most recent successful [`update`].
    ///
    /// [`update`]: LandmarkSource::update
    fn hands(&self) -> &[Hand];
}

// ════════════════════════════════════════════════════════════════════════════
// MouseSource — simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Pixel gap synthesized between thumb and index tips while the button is
/// up — comfortably past any plausible pinch threshold.
const OPEN_HAND_GAP: f32 = 400.0;

/// Simulation source: the window's mouse pointer stands in for the index
/// fingertip.  Holding the left button moves the synthetic thumb tip onto
/// the cursor, which reads as a pinch.
pub struct MouseSource {
    rx: Receiver<PointerSample>,
    hands: Vec<Hand>,
}

impl MouseSource {
    pub fn new(rx: Receiver<PointerSample>) -> Self {
        MouseSource {
            rx,
            hands: Vec::new(),
        }
    }
}

impl LandmarkSource for MouseSource {
    fn update(&mut self) -> bool {
        // Keep only the newest sample; stale positions are worthless.
        let mut latest = None;
        while let Ok(sample) = self.rx.try_recv() {
            latest = Some(sample);
        }
        let Some(sample) = latest else {
            return false;
        };

        let cursor = Point::new(sample.x, sample.y);
        let thumb = if sample.pressed {
            cursor
        } else {
            Point::new(sample.x + OPEN_HAND_GAP, sample.y)
        };
        self.hands.clear();
        self.hands.push(Hand::from_tips(cursor, thumb));
        true
    }

    fn hands(&self) -> &[Hand] {
        &self.hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand tracking backed by a LeapMotion controller.
///
/// Fingertip positions arrive in millimetres relative to the device; they
/// are mapped linearly into screen pixels over the interaction box the
/// device reliably covers (±200 mm horizontally, 100–400 mm of height).
#[cfg(feature = "leap")]
pub struct LeapSource {
    connection: leaprs::Connection,
    hands: Vec<Hand>,
    screen_w: f32,
    screen_h: f32,
}

#[cfg(feature = "leap")]
impl LeapSource {
    const X_RANGE_MM: f32 = 200.0;
    const Y_MIN_MM: f32 = 100.0;
    const Y_MAX_MM: f32 = 400.0;

    pub fn connect(screen_w: f32, screen_h: f32) -> Result<Self, String> {
        use leaprs::{Connection, ConnectionConfig};

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| format!("LeapC connection failed: {:?}", e))?;
        connection
            .open()
            .map_err(|e| format!("LeapMotion device open failed: {:?}", e))?;

        Ok(LeapSource {
            connection,
            hands: Vec::new(),
            screen_w,
            screen_h,
        })
    }

    fn to_screen(&self, x_mm: f32, y_mm: f32) -> Point {
        let nx = ((x_mm + Self::X_RANGE_MM) / (2.0 * Self::X_RANGE_MM)).clamp(0.0, 1.0);
        // Device Y grows upward; screen Y grows downward.
        let ny = ((y_mm - Self::Y_MIN_MM) / (Self::Y_MAX_MM - Self::Y_MIN_MM)).clamp(0.0, 1.0);
        Point::new(nx * self.screen_w, (1.0 - ny) * self.screen_h)
    }
}

#[cfg(feature = "leap")]
impl LandmarkSource for LeapSource {
    fn update(&mut self) -> bool {
        use leaprs::Event;

        let msg = match self.connection.poll(10) {
            Ok(m) => m,
            Err(_) => return false,
        };

        if let Event::Tracking(frame) = msg.event() {
            self.hands.clear();
            for hand in frame.hands() {
                let digits: Vec<_> = hand.digits().collect();
                if digits.len() < 5 {
                    continue;
                }
                let thumb = digits[0].distal().next_joint();
                let index = digits[1].distal().next_joint();
                self.hands.push(Hand::from_tips(
                    self.to_screen(index.x, index.y),
                    self.to_screen(thumb.x, thumb.y),
                ));
            }
            true
        } else {
            false
        }
    }

    fn hands(&self) -> &[Hand] {
        &self.hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn no_sample_means_no_frame() {
        let (_tx, rx) = mpsc::channel();
        let mut src = MouseSource::new(rx);
        assert!(!src.update());
        assert!(src.hands().is_empty());
    }

    #[test]
    fn latest_sample_wins() {
        let (tx, rx) = mpsc::channel();
        let mut src = MouseSource::new(rx);
        tx.send(PointerSample { x: 1.0, y: 1.0, pressed: false }).unwrap();
        tx.send(PointerSample { x: 50.0, y: 60.0, pressed: false }).unwrap();
        assert!(src.update());
        assert_eq!(src.hands().len(), 1);
        assert_eq!(src.hands()[0].index_tip(), Some(Point::new(50.0, 60.0)));
    }

    #[test]
    fn button_down_reads_as_pinch() {
        let (tx, rx) = mpsc::channel();
        let mut src = MouseSource::new(rx);
        tx.send(PointerSample { x: 10.0, y: 10.0, pressed: true }).unwrap();
        src.update();
        let hand = &src.hands()[0];
        assert_eq!(hand.index_tip(), hand.thumb_tip());
    }

    #[test]
    fn button_up_keeps_tips_apart() {
        let (tx, rx) = mpsc::channel();
        let mut src = MouseSource::new(rx);
        tx.send(PointerSample { x: 10.0, y: 10.0, pressed: false }).unwrap();
        src.update();
        let hand = &src.hands()[0];
        let gap = hand.index_tip().unwrap().distance(hand.thumb_tip().unwrap());
        assert_eq!(gap, OPEN_HAND_GAP);
    }

    #[test]
    fn stale_hands_cleared_between_updates() {
        let (tx, rx) = mpsc::channel();
        let mut src = MouseSource::new(rx);
        tx.send(PointerSample { x: 10.0, y: 10.0, pressed: false }).unwrap();
        assert!(src.update());
        // No new sample: frame skipped, previous hands still readable.
        assert!(!src.update());
        assert_eq!(src.hands().len(), 1);
    }
}

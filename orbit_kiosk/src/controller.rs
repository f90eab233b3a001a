//! The home-screen controller and the kiosk run loop.
//!
//! [`HomeScreen::advance`] is the pure decision core: one call per frame
//! with the clock, the tracked hands, and any pending voice commands, and
//! it answers with a [`FrameOutcome`].  All the side effects — cues,
//! dispatching apps, drawing — live in [`run`], which keeps the decision
//! logic deterministic and testable without a window.
//!
//! Priority order per frame:
//!
//! | rank | input                               | outcome          |
//! |------|-------------------------------------|------------------|
//! | 1    | voice launch request                | `Launch(i)`      |
//! | 2    | voice toggle or pinch on Home       | `Toggled(open)`  |
//! | 3    | pinch on a visible ring member      | `Launch(i)`      |
//! | 4    | anything else                       | `Idle`           |
//!
//! Gesture toggles and launches require every circle to be at rest, so a
//! pinch can never restart an in-flight animation.  Voice requests skip
//! that guard (they may arrive at any time) but still honor the toggle
//! debounce.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use orbit_ui::circle::AppCircle;
use orbit_ui::geom::Point;
use orbit_ui::gesture::{clear_hover, read_hand, Hand, PINCH_THRESHOLD};
use orbit_ui::layout::make_circles;

use crate::apps::{CategoryPickerApp, TextViewerApp, TunerApp};
use crate::audio::{Cue, CuePlayer};
#[cfg(feature = "leap")]
use crate::landmarks::LeapSource;
#[cfg(not(feature = "leap"))]
use crate::landmarks::MouseSource;
use crate::landmarks::LandmarkSource;
use crate::registry::{AppRegistry, COOKING_APP, TEXT_VIEWER_APP, TUNER_APP};
use crate::visualizer::Visualizer;
use crate::voice::{spawn_listener, CommandCell, StdinSource, TranscriptCell, VoiceCommands};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// Kiosk tuning knobs.  Defaults describe the 1920×1080 reference layout;
/// [`KioskConfig::for_size`] rescales the geometry for other resolutions.
#[derive(Clone, Debug)]
pub struct KioskConfig {
    pub screen_w: usize,
    pub screen_h: usize,
    /// Ring members (the Home circle is extra).
    pub ring_count: usize,
    pub main_radius: f32,
    pub app_radius: f32,
    /// Center-to-anchor distance of the ring.
    pub ring_distance: f32,
    pub pinch_threshold: f32,
    /// Minimum seconds between ring toggles.
    pub toggle_delay: f64,
    pub audio_dir: PathBuf,
    pub frame_delay_ms: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        KioskConfig {
            screen_w: 1920,
            screen_h: 1080,
            ring_count: 8,
            main_radius: 100.0,
            app_radius: 75.0,
            ring_distance: 250.0,
            pinch_threshold: PINCH_THRESHOLD,
            toggle_delay: 1.0,
            audio_dir: PathBuf::from("./audio"),
            frame_delay_ms: 50,
        }
    }
}

impl KioskConfig {
    /// Reference layout rescaled to `w`×`h`.  All lengths scale with the
    /// width so circles keep their proportions on narrower screens.
    pub fn for_size(w: usize, h: usize) -> Self {
        let scale = w as f32 / 1920.0;
        let base = KioskConfig::default();
        KioskConfig {
            screen_w: w,
            screen_h: h,
            main_radius: base.main_radius * scale,
            app_radius: base.app_radius * scale,
            ring_distance: base.ring_distance * scale,
            pinch_threshold: base.pinch_threshold * scale,
            ..base
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.screen_w as f32 / 2.0, self.screen_h as f32 / 2.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HomeScreen
// ════════════════════════════════════════════════════════════════════════════

/// What one frame of input amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Idle,
    /// The ring toggled; the payload is the new expanded state.
    Toggled(bool),
    /// An app launch was requested for this circle index.
    Launch(usize),
}

/// The home-screen state machine: the circle set plus toggle bookkeeping.
pub struct HomeScreen {
    circles: Vec<AppCircle>,
    apps_visible: bool,
    last_toggle: f64,
    pinch_threshold: f32,
    toggle_delay: f64,
}

impl HomeScreen {
    pub fn new(cfg: &KioskConfig) -> Self {
        HomeScreen {
            circles: make_circles(
                cfg.center(),
                cfg.ring_count,
                cfg.main_radius,
                cfg.app_radius,
                cfg.ring_distance,
            ),
            apps_visible: false,
            // Negative infinity so the very first toggle always passes the
            // debounce.
            last_toggle: f64::NEG_INFINITY,
            pinch_threshold: cfg.pinch_threshold,
            toggle_delay: cfg.toggle_delay,
        }
    }

    pub fn circles(&self) -> &[AppCircle] {
        &self.circles
    }

    pub fn circles_mut(&mut self) -> &mut [AppCircle] {
        &mut self.circles
    }

    pub fn apps_visible(&self) -> bool {
        self.apps_visible
    }

    fn all_resting(&self) -> bool {
        self.circles.iter().all(|c| c.is_resting())
    }

    /// Process one frame of input.  Animations advance separately through
    /// [`AppCircle::update`] when the frame is drawn.
    pub fn advance(&mut self, now: f64, hands: &[Hand], commands: VoiceCommands) -> FrameOutcome {
        clear_hover(&mut self.circles);

        // Voice launches outrank everything, including in-flight rings.
        if commands.launch_app > 0 {
            return FrameOutcome::Launch(commands.launch_app);
        }

        // First hand to pinch a hovered circle wins the frame.
        let mut pinch_target = None;
        for hand in hands {
            if let Some(p) = read_hand(hand, &mut self.circles, self.pinch_threshold, now) {
                if pinch_target.is_none() && p.pinched {
                    pinch_target = p.hovered;
                }
            }
        }

        let all_resting = self.all_resting();
        let gesture_toggle =
            all_resting && matches!(pinch_target, Some(i) if self.circles[i].is_primary);

        if commands.home_toggle || gesture_toggle {
            if now - self.last_toggle > self.toggle_delay {
                return self.toggle(now);
            }
            return FrameOutcome::Idle;
        }

        if let Some(i) = pinch_target {
            let c = &self.circles[i];
            if all_resting && self.apps_visible && c.is_visible() && !c.is_primary {
                return FrameOutcome::Launch(c.index);
            }
        }

        FrameOutcome::Idle
    }

    fn toggle(&mut self, now: f64) -> FrameOutcome {
        self.apps_visible = !self.apps_visible;
        self.last_toggle = now;
        for c in self.circles.iter_mut().filter(|c| !c.is_primary) {
            c.begin_transition(self.apps_visible, now);
        }
        FrameOutcome::Toggled(self.apps_visible)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Run loop
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: KioskConfig) -> Result<(), String> {
    let (ptr_tx, ptr_rx) = mpsc::channel();
    let mut vis = Visualizer::new(&cfg, ptr_tx)?;

    #[cfg(not(feature = "leap"))]
    let mut source = MouseSource::new(ptr_rx);
    #[cfg(feature = "leap")]
    let mut source = {
        drop(ptr_rx);
        LeapSource::connect(cfg.screen_w as f32, cfg.screen_h as f32)?
    };

    let commands = CommandCell::new();
    let transcript = TranscriptCell::new();
    spawn_listener(StdinSource, commands.clone(), transcript.clone());

    let cues = CuePlayer::new(cfg.audio_dir.clone());
    cues.play(Cue::Startup);

    let mut registry = AppRegistry::new();
    registry.register(TEXT_VIEWER_APP, Box::new(TextViewerApp::new(&cfg)));
    registry.register(COOKING_APP, Box::new(CategoryPickerApp::new(&cfg)));
    registry.register(TUNER_APP, Box::new(TunerApp::new()));

    let mut screen = HomeScreen::new(&cfg);
    let mut status = String::from("pinch the home circle or say 'open home'");
    let clock = Instant::now();

    loop {
        if !vis.pump_input() {
            break;
        }
        if let Some(text) = transcript.take() {
            status = format!("heard: {}", text);
        }
        if !source.update() {
            // No fresh landmarks; keep the window responsive and retry.
            vis.present();
            continue;
        }

        let now = clock.elapsed().as_secs_f64();
        match screen.advance(now, source.hands(), commands.take()) {
            FrameOutcome::Idle => {}
            FrameOutcome::Toggled(open) => {
                cues.play(Cue::Home);
                println!("[kiosk] ring {}", if open { "opened" } else { "closed" });
            }
            FrameOutcome::Launch(i) => {
                if registry.contains(i) {
                    cues.play(Cue::Confirm);
                }
                match registry.dispatch(i, &mut vis, &mut source) {
                    Ok(()) => status = format!("app {} closed", i),
                    Err(e) => {
                        eprintln!("[kiosk] {}", e);
                        cues.play(Cue::Reject);
                        status = e.to_string();
                    }
                }
            }
        }

        vis.begin_frame();
        let now = clock.elapsed().as_secs_f64();
        let mut home = None;
        for c in screen.circles_mut() {
            let rs = c.update(now);
            if c.is_primary {
                // Drawn last so it stays on top of collapsing members.
                home = Some((rs, c.label.clone()));
            } else if rs.visible {
                vis.draw_app_circle(&rs, &c.label);
            }
        }
        if let Some((rs, label)) = home {
            vis.draw_app_circle(&rs, &label);
        }
        for hand in source.hands() {
            if let Some(tip) = hand.index_tip() {
                vis.draw_cursor(tip);
            }
        }
        vis.draw_status(&status);
        vis.present();
    }

    println!("[kiosk] shutting down");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_ui::circle::ANIMATION_DURATION;

    fn screen() -> HomeScreen {
        HomeScreen::new(&KioskConfig::default())
    }

    fn pinch_at(p: Point) -> Hand {
        Hand::from_tips(p, p)
    }

    fn open_hand_at(p: Point) -> Hand {
        Hand::from_tips(p, Point::new(p.x + 400.0, p.y))
    }

    fn none() -> VoiceCommands {
        VoiceCommands::default()
    }

    fn toggle_cmd() -> VoiceCommands {
        VoiceCommands {
            home_toggle: true,
            launch_app: 0,
        }
    }

    fn settle(s: &mut HomeScreen, now: f64) {
        for c in s.circles_mut() {
            c.update(now);
        }
    }

    const CENTER: Point = Point { x: 960.0, y: 540.0 };

    #[test]
    fn pinching_home_opens_the_ring() {
        let mut s = screen();
        let out = s.advance(0.0, &[pinch_at(CENTER)], none());
        assert_eq!(out, FrameOutcome::Toggled(true));
        assert!(s.apps_visible());
        assert!(s.circles().iter().filter(|c| !c.is_primary).all(|c| !c.is_resting()));
    }

    #[test]
    fn collapsed_pinch_hits_home_not_hidden_members() {
        // Hidden ring members are parked under the home circle; the pinch
        // must read as a toggle, never a launch.
        let mut s = screen();
        assert_eq!(s.advance(0.0, &[pinch_at(CENTER)], none()), FrameOutcome::Toggled(true));
    }

    #[test]
    fn toggle_is_debounced() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        settle(&mut s, ANIMATION_DURATION);
        // Within the delay: even a voice toggle is swallowed.
        assert_eq!(s.advance(0.9, &[], toggle_cmd()), FrameOutcome::Idle);
        assert!(s.apps_visible());
        // Past the delay it flips back.
        assert_eq!(s.advance(1.1, &[], toggle_cmd()), FrameOutcome::Toggled(false));
    }

    #[test]
    fn pinch_during_transition_is_ignored() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        // Advance the animation halfway; circles are mid-flight.
        settle(&mut s, ANIMATION_DURATION / 2.0);
        let mid = s.circles()[3].center;
        assert!(!s.circles()[3].is_resting());
        assert_eq!(
            s.advance(ANIMATION_DURATION / 2.0, &[pinch_at(mid)], none()),
            FrameOutcome::Idle
        );
    }

    #[test]
    fn toggle_moves_every_ring_member_in_lockstep() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        settle(&mut s, ANIMATION_DURATION / 2.0);
        for c in s.circles().iter().filter(|c| !c.is_primary) {
            assert!(c.is_visible());
            assert_eq!(c.center, CENTER.lerp(c.final_pos, 0.5), "index {}", c.index);
        }
    }

    #[test]
    fn pinch_on_ring_member_launches_when_expanded() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        settle(&mut s, ANIMATION_DURATION);
        let anchor = s.circles()[3].final_pos;
        assert_eq!(s.advance(2.0, &[pinch_at(anchor)], none()), FrameOutcome::Launch(3));
    }

    #[test]
    fn hover_without_pinch_never_launches() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        settle(&mut s, ANIMATION_DURATION);
        let anchor = s.circles()[3].final_pos;
        assert_eq!(s.advance(2.0, &[open_hand_at(anchor)], none()), FrameOutcome::Idle);
        assert!(s.circles()[3].is_hovered);
    }

    #[test]
    fn voice_toggle_needs_no_hands() {
        let mut s = screen();
        assert_eq!(s.advance(5.0, &[], toggle_cmd()), FrameOutcome::Toggled(true));
    }

    #[test]
    fn voice_toggle_skips_the_resting_guard() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        // Ring never landed, but the voice request still flips it once the
        // debounce window passes.
        assert_eq!(s.advance(1.5, &[], toggle_cmd()), FrameOutcome::Toggled(false));
    }

    #[test]
    fn voice_launch_outranks_everything() {
        let mut s = screen();
        s.advance(0.0, &[pinch_at(CENTER)], none());
        let cmd = VoiceCommands {
            home_toggle: false,
            launch_app: 5,
        };
        // Mid-transition, ring not landed: the launch goes through anyway.
        assert_eq!(s.advance(0.2, &[], cmd), FrameOutcome::Launch(5));
    }

    #[test]
    fn first_toggle_passes_debounce_immediately() {
        let mut s = screen();
        assert_eq!(s.advance(0.0, &[], toggle_cmd()), FrameOutcome::Toggled(true));
    }

    #[test]
    fn for_size_scales_geometry_with_width() {
        let cfg = KioskConfig::for_size(960, 540);
        assert_eq!(cfg.main_radius, 50.0);
        assert_eq!(cfg.app_radius, 37.5);
        assert_eq!(cfg.ring_distance, 125.0);
        assert_eq!(cfg.pinch_threshold, 50.0);
        assert_eq!(cfg.center(), Point::new(480.0, 270.0));
    }
}

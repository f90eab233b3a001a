//! The demo apps behind the home-screen ring: a scrolling text viewer, the
//! cooking category picker, and a guitar tuner.
//!
//! Each app owns the render surface and the landmark source for as long as
//! it runs (see [`MiniApp`]) and returns to the home screen on Escape.
//! The pure models live in `orbit_apps`; this module wires them to input
//! and pixels.

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use minifb::Key;
use orbit_apps::category::CategoryWheel;
use orbit_apps::text_view::TextScroll;
use orbit_apps::tuner::{closest_string, detect_pitch, verdict, Verdict, STANDARD_TUNING};
use orbit_ui::gesture::{clear_hover, read_hand};
use orbit_ui::geom::Point;

use crate::controller::KioskConfig;
use crate::landmarks::LandmarkSource;
use crate::registry::MiniApp;
use crate::visualizer::{Visualizer, GRAY, GREEN, RED, WHITE, YELLOW};

// ════════════════════════════════════════════════════════════════════════════
// Text viewer
// ════════════════════════════════════════════════════════════════════════════

const LINE_HEIGHT: f32 = 60.0;
const WHEEL_STEP: f32 = 30.0;
const KEY_STEP: f32 = 8.0;

const SAMPLE_TEXT: &str = "\
On clear nights the kitchen window framed the whole valley,
and from the table you could watch the lights come on one
farm at a time, as if someone were walking the ridge with a
box of matches.

My grandmother kept her recipes in a tin above the stove.
None of them had measurements. A handful of this, a glass of
that, cook it until it smells right. When I asked how long
that was, she said the food would tell me, and it turned out
she was right.

The bread came first, always. Then the soup, then whatever
the garden had decided to give up that week. We ate late and
talked later, and nobody ever reached for a clock.";

/// Full-screen scrolling text reader.  Scroll wheel and arrow keys move
/// the text; Escape returns to the home screen.
pub struct TextViewerApp {
    scroll: TextScroll,
}

impl TextViewerApp {
    pub fn new(cfg: &KioskConfig) -> Self {
        TextViewerApp {
            scroll: TextScroll::new(SAMPLE_TEXT, LINE_HEIGHT, cfg.screen_h as f32),
        }
    }
}

impl MiniApp for TextViewerApp {
    fn run(&mut self, vis: &mut Visualizer, source: &mut dyn LandmarkSource) {
        while vis.pump_input() {
            if vis.escape_pressed() {
                break;
            }
            // Keep the landmark pipeline drained even though the viewer is
            // keyboard-driven.
            source.update();

            self.scroll.scroll_by(vis.scroll_delta() * WHEEL_STEP);
            if vis.key_down(Key::Up) {
                self.scroll.scroll_by(KEY_STEP);
            }
            if vis.key_down(Key::Down) {
                self.scroll.scroll_by(-KEY_STEP);
            }

            vis.begin_frame();
            let mut y = self.scroll.offset();
            for line in self.scroll.lines() {
                vis.draw_label(line, 60, y.round() as i32, 3, WHITE);
                y += LINE_HEIGHT;
            }
            vis.draw_status("text viewer: scroll wheel or arrows, esc to exit");
            vis.present();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Category picker
// ════════════════════════════════════════════════════════════════════════════

/// The cooking category wheel: hover and pinch to pick a category.
pub struct CategoryPickerApp {
    center: Point,
    pinch_threshold: f32,
}

impl CategoryPickerApp {
    pub fn new(cfg: &KioskConfig) -> Self {
        CategoryPickerApp {
            center: cfg.center(),
            pinch_threshold: cfg.pinch_threshold,
        }
    }
}

impl MiniApp for CategoryPickerApp {
    fn run(&mut self, vis: &mut Visualizer, source: &mut dyn LandmarkSource) {
        let clock = Instant::now();
        // A fresh wheel each launch, expanding out from the center.
        let mut wheel = CategoryWheel::new(self.center, 0.0);
        let mut status = String::from("pinch a category, esc to exit");

        while vis.pump_input() {
            if vis.escape_pressed() {
                break;
            }
            if !source.update() {
                vis.present();
                continue;
            }
            let now = clock.elapsed().as_secs_f64();

            clear_hover(wheel.circles_mut());
            let mut picked = None;
            for hand in source.hands() {
                if let Some(p) = read_hand(hand, wheel.circles_mut(), self.pinch_threshold, now) {
                    if picked.is_none() {
                        picked = wheel.pick(p.hovered, p.pinched).map(str::to_string);
                    }
                }
            }
            if let Some(label) = picked {
                println!("[picker] selected {}", label);
                status = format!("selected: {}", label);
            }

            vis.begin_frame();
            for c in wheel.circles_mut() {
                let rs = c.update(now);
                if rs.visible {
                    vis.draw_app_circle(&rs, &c.label);
                }
            }
            for hand in source.hands() {
                if let Some(tip) = hand.index_tip() {
                    vis.draw_cursor(tip);
                }
            }
            vis.draw_status(&status);
            vis.present();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Guitar tuner
// ════════════════════════════════════════════════════════════════════════════

/// Average interleaved frames down to one channel.
fn fold_to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Live microphone capture feeding mono sample chunks over a channel.
/// The stream stays open for as long as the capture lives.
struct Capture {
    rx: Receiver<Vec<f32>>,
    sample_rate: u32,
    _stream: cpal::Stream,
}

impl Capture {
    fn start() -> Result<Capture, String> {
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
        use cpal::SampleFormat;

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| "no input device".to_string())?;
        let config = device.default_input_config().map_err(|e| e.to_string())?;
        if config.sample_format() != SampleFormat::F32 {
            return Err(format!("unsupported sample format {:?}", config.sample_format()));
        }
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let (tx, rx) = mpsc::channel();
        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(fold_to_mono(data, channels));
                },
                |e| eprintln!("[tuner] input stream error: {}", e),
                None,
            )
            .map_err(|e| e.to_string())?;
        stream.play().map_err(|e| e.to_string())?;

        println!("[tuner] capturing at {} hz, {} channel(s)", sample_rate, channels);
        Ok(Capture {
            rx,
            sample_rate,
            _stream: stream,
        })
    }
}

/// Standard-tuning guitar tuner.  Shows the six strings, highlights the
/// one closest to the detected pitch, and colors it by the tuning verdict.
pub struct TunerApp {
    window: Vec<f32>,
}

impl TunerApp {
    pub fn new() -> Self {
        TunerApp { window: Vec::new() }
    }
}

impl Default for TunerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniApp for TunerApp {
    fn run(&mut self, vis: &mut Visualizer, source: &mut dyn LandmarkSource) {
        let capture = match Capture::start() {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("[tuner] {}", e);
                None
            }
        };
        self.window.clear();
        let mut detected: Option<f32> = None;

        while vis.pump_input() {
            if vis.escape_pressed() {
                break;
            }
            source.update();

            if let Some(cap) = &capture {
                while let Ok(chunk) = cap.rx.try_recv() {
                    self.window.extend(chunk);
                }
                // ~100 ms of audio per analysis window.
                let need = (cap.sample_rate / 10) as usize;
                if self.window.len() >= need {
                    let start = self.window.len() - need;
                    detected = detect_pitch(&self.window[start..], cap.sample_rate);
                    if self.window.len() > need * 4 {
                        self.window.drain(..start);
                    }
                }
            }

            vis.begin_frame();
            let nearest = detected.map(closest_string);
            for (i, s) in STANDARD_TUNING.iter().enumerate() {
                let color = match (nearest, detected) {
                    (Some(n), Some(f)) if n == i => match verdict(*s, f) {
                        Verdict::InTune => GREEN,
                        Verdict::Close => YELLOW,
                        Verdict::Off => RED,
                    },
                    _ => GRAY,
                };
                let line = format!("{}  {:.2} hz", s.name, s.frequency);
                vis.draw_label(&line, 60, 100 + i as i32 * 80, 3, color);
            }
            match detected {
                Some(f) => vis.draw_label(&format!("heard {:.1} hz", f), 60, 620, 3, WHITE),
                None if capture.is_none() => vis.draw_label("no input device", 60, 620, 3, RED),
                None => {}
            }
            vis.draw_status("tuner: play an open string, esc to exit");
            vis.present();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_fold_averages_frames() {
        let stereo = [1.0, 3.0, 0.0, 2.0, -1.0, 1.0];
        assert_eq!(fold_to_mono(&stereo, 2), vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn mono_fold_passes_single_channel_through() {
        let mono = [0.25, -0.5, 0.75];
        assert_eq!(fold_to_mono(&mono, 1), mono.to_vec());
    }

    #[test]
    fn sample_text_is_scrollable_at_kiosk_height() {
        let lines = SAMPLE_TEXT.lines().count() as f32;
        assert!(lines * LINE_HEIGHT > 540.0, "needs to overflow a small screen");
    }
}

//! Software-rendered visualizer using `minifb`.
//!
//! Owns the window, the pixel buffer, and the pointer-sample sender that
//! feeds the mouse simulation source.  Everything is drawn with a handful
//! of primitives: filled discs, ring outlines, rectangles, and a tiny
//! bitmap font scaled up for the kiosk resolution.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use orbit_ui::circle::RenderState;
use orbit_ui::geom::Point;

use crate::controller::KioskConfig;
use crate::landmarks::PointerSample;

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

pub const BG_COLOR: u32 = 0xFF000000;
pub const NAVY_BLUE: u32 = 0xFF14_1428; // (20, 20, 40)
pub const LIGHT_BLUE: u32 = 0xFFAD_D8E6; // (173, 216, 230)
pub const WHITE: u32 = 0xFFF5_F5F5;
pub const STATUS_BG: u32 = 0xFF0F_1E3C;
pub const GRAY: u32 = 0xFF9E_9E9E;
pub const GREEN: u32 = 0xFF00_C853;
pub const YELLOW: u32 = 0xFFFF_D600;
pub const RED: u32 = 0xFFD3_2F2F;

const STATUS_BAR_H: i32 = 40;
const CIRCLE_BORDER: f32 = 5.0;
const CURSOR_RADIUS: f32 = 15.0;
const CURSOR_BORDER: f32 = 3.0;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    w: usize,
    h: usize,
    ptr_tx: Sender<PointerSample>,
}

impl Visualizer {
    pub fn new(cfg: &KioskConfig, ptr_tx: Sender<PointerSample>) -> Result<Self, String> {
        let mut window = Window::new(
            "Orbit Kiosk — gesture home screen",
            cfg.screen_w,
            cfg.screen_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(Duration::from_millis(cfg.frame_delay_ms)));

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; cfg.screen_w * cfg.screen_h],
            w: cfg.screen_w,
            h: cfg.screen_h,
            ptr_tx,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    /// Forward the window's mouse state to the simulation source and check
    /// the quit key.  Returns false when the kiosk should shut down.
    pub fn pump_input(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return false;
        }
        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let pressed = self.window.get_mouse_down(MouseButton::Left);
            let _ = self.ptr_tx.send(PointerSample { x, y, pressed });
        }
        true
    }

    /// One-shot Escape press — demo apps use it to return to the home
    /// screen.
    pub fn escape_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.window.is_key_down(key)
    }

    /// Vertical scroll wheel movement since last frame, zero when idle.
    pub fn scroll_delta(&self) -> f32 {
        self.window
            .get_scroll_wheel()
            .map(|(_, y)| y)
            .unwrap_or(0.0)
    }

    pub fn begin_frame(&mut self) {
        self.buf.fill(BG_COLOR);
    }

    pub fn present(&mut self) {
        self.window.update_with_buffer(&self.buf, self.w, self.h).ok();
    }

    // ── App-circle and cursor drawing ─────────────────────────────────────

    /// The standard kiosk circle: navy disc, light-blue border, centered
    /// white label.
    pub fn draw_app_circle(&mut self, rs: &RenderState, label: &str) {
        self.draw_disc(rs.center, rs.radius, NAVY_BLUE);
        self.draw_ring(rs.center, rs.radius, CIRCLE_BORDER, LIGHT_BLUE);
        self.draw_label_centered(label, rs.center, 3, WHITE);
    }

    /// The index-fingertip cursor.
    pub fn draw_cursor(&mut self, p: Point) {
        self.draw_ring(p, CURSOR_RADIUS, CURSOR_BORDER, LIGHT_BLUE);
    }

    /// Bottom status bar with the latest transcript / status line.
    pub fn draw_status(&mut self, text: &str) {
        let h = self.h as i32;
        let w = self.w as i32;
        self.fill_rect(0, h - STATUS_BAR_H, w, STATUS_BAR_H, STATUS_BG);
        self.draw_label(text, 12, h - STATUS_BAR_H + 10, 2, WHITE);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for row in y.max(0)..(y + h).min(self.h as i32) {
            for col in x.max(0)..(x + w).min(self.w as i32) {
                self.buf[row as usize * self.w + col as usize] = color;
            }
        }
    }

    /// Filled circle, drawn as horizontal spans.
    pub fn draw_disc(&mut self, center: Point, radius: f32, color: u32) {
        let r = radius.max(0.0);
        let top = (center.y - r).floor() as i32;
        let bottom = (center.y + r).ceil() as i32;
        for row in top..=bottom {
            let dy = row as f32 - center.y;
            let span = r * r - dy * dy;
            if span < 0.0 {
                continue;
            }
            let half = span.sqrt();
            self.fill_rect(
                (center.x - half).round() as i32,
                row,
                (half * 2.0).round() as i32,
                1,
                color,
            );
        }
    }

    /// Circle outline of the given stroke width.
    pub fn draw_ring(&mut self, center: Point, radius: f32, width: f32, color: u32) {
        let r_out = radius.max(0.0);
        let r_in = (radius - width).max(0.0);
        let top = (center.y - r_out).floor() as i32;
        let bottom = (center.y + r_out).ceil() as i32;
        for row in top..=bottom {
            let dy = row as f32 - center.y;
            let outer_sq = r_out * r_out - dy * dy;
            if outer_sq < 0.0 {
                continue;
            }
            let outer = outer_sq.sqrt();
            let inner_sq = r_in * r_in - dy * dy;
            if inner_sq <= 0.0 {
                // Row crosses only the stroke; one solid span.
                self.fill_rect(
                    (center.x - outer).round() as i32,
                    row,
                    (outer * 2.0).round() as i32,
                    1,
                    color,
                );
            } else {
                let inner = inner_sq.sqrt();
                let seg = (outer - inner).round().max(1.0) as i32;
                self.fill_rect((center.x - outer).round() as i32, row, seg, 1, color);
                self.fill_rect((center.x + inner).round() as i32, row, seg, 1, color);
            }
        }
    }

    /// Render text with the built-in 3×5 bitmap font, scaled up by `scale`.
    pub fn draw_label(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (gy, bits) in rows.iter().enumerate() {
                for gx in 0..3i32 {
                    if bits & (1 << (2 - gx)) != 0 {
                        self.fill_rect(
                            cx + gx * scale,
                            y + gy as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cx += 4 * scale;
            if cx >= self.w as i32 {
                break;
            }
        }
    }

    pub fn label_width(text: &str, scale: i32) -> i32 {
        let n = text.chars().count() as i32;
        if n == 0 {
            0
        } else {
            (n * 4 - 1) * scale
        }
    }

    pub fn draw_label_centered(&mut self, text: &str, center: Point, scale: i32, color: u32) {
        let w = Self::label_width(text, scale);
        let h = 5 * scale;
        self.draw_label(
            text,
            center.x.round() as i32 - w / 2,
            center.y.round() as i32 - h / 2,
            scale,
            color,
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font (uppercase folding; unknown characters render blank)
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b010, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b110, 0b001, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '"' => [0b101, 0b101, 0b000, 0b000, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        _ => [0b000; 5],
    }
}

//! The `AppCircle` widget — one circular control on the home screen.
//!
//! A circle lives in one of two motion states: `Resting` at an anchor, or
//! `Transitioning` between the shared screen center and its ring anchor.
//! The tagged [`Motion`] enum makes contradictory flag combinations
//! (animating-but-no-start-time and the like) unrepresentable.

use crate::geom::Point;

/// Seconds a collapse/expand transition takes.
pub const ANIMATION_DURATION: f64 = 0.5;

/// Hover swell rate in pixels per second of continuous hover.
pub const HOVER_GROWTH_RATE: f32 = 60.0;

/// Hover swell cap as a fraction of the base radius.
pub const HOVER_GROWTH_CAP: f32 = 0.25;

// ════════════════════════════════════════════════════════════════════════════
// Motion
// ════════════════════════════════════════════════════════════════════════════

/// Motion state of a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Parked at an anchor.  A hidden resting circle is neither drawn nor
    /// eligible for launch.
    Resting { visible: bool },
    /// In flight between the shared center and the ring anchor.
    /// `becoming_visible` fixes the travel direction for the whole flight.
    Transitioning { becoming_visible: bool, started: f64 },
}

/// Opaque handle into a renderer-owned icon table.  The core never touches
/// pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconHandle(pub usize);

/// What the renderer needs to draw one circle this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub center: Point,
    pub radius: f32,
    pub visible: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// AppCircle
// ════════════════════════════════════════════════════════════════════════════

/// A single circular control: the Home circle or one ring member.
#[derive(Clone, Debug)]
pub struct AppCircle {
    /// Current position; mutated by [`AppCircle::update`] while in flight.
    pub center: Point,
    /// Base radius.  Hit-testing always uses this, never the hover-grown one.
    pub radius: f32,
    /// Stable identity used to route to a sub-application (0 = Home).
    pub index: usize,
    pub label: String,
    pub icon: Option<IconHandle>,
    /// Exactly one circle per screen is primary; the toggle never hides it.
    pub is_primary: bool,
    /// Resting anchor on the ring, or the shared center for the primary.
    pub final_pos: Point,
    /// The shared screen center all transitions start from or return to.
    pub origin: Point,
    pub motion: Motion,
    /// When continuous hover began; `None` is the not-hovering sentinel.
    pub hover_started: Option<f64>,
    /// Per-frame flag, cleared at the start of every frame.
    pub is_hovered: bool,
}

impl AppCircle {
    /// A circle parked at `origin`.  Ring members start hidden; the primary
    /// circle starts visible with `final_pos == origin`.
    pub fn new(origin: Point, radius: f32, index: usize, final_pos: Point, is_primary: bool) -> Self {
        let label = if is_primary {
            "Home".to_string()
        } else {
            format!("App {}", index)
        };
        AppCircle {
            center: origin,
            radius,
            index,
            label,
            icon: None,
            is_primary,
            final_pos,
            origin,
            motion: Motion::Resting { visible: is_primary },
            hover_started: None,
            is_hovered: false,
        }
    }

    /// True iff `p` lies within the base radius, boundary inclusive.
    pub fn is_hovered_at(&self, p: Point) -> bool {
        p.distance(self.center) <= self.radius
    }

    /// Whether the circle counts as visible for launch eligibility.
    /// Flips at the *start* of a transition, matching the toggle semantics.
    pub fn is_visible(&self) -> bool {
        match self.motion {
            Motion::Resting { visible } => visible,
            Motion::Transitioning { becoming_visible, .. } => becoming_visible,
        }
    }

    /// No transition in flight.
    pub fn is_resting(&self) -> bool {
        matches!(self.motion, Motion::Resting { .. })
    }

    /// Whether the circle should be drawn: resting-visible, or anywhere
    /// mid-flight (a collapsing circle stays on screen until it lands).
    pub fn is_drawn(&self) -> bool {
        self.is_visible() || !self.is_resting()
    }

    /// Start a collapse or expand transition at `now`.
    ///
    /// Interpolation always runs between `origin` and `final_pos`, never
    /// from the current mid-flight position.  Re-triggering before the
    /// previous flight lands therefore causes a visible jump back to an
    /// endpoint.  Known limitation, preserved deliberately; callers guard
    /// against re-entry instead (see the controller's all-resting check).
    pub fn begin_transition(&mut self, becoming_visible: bool, now: f64) {
        self.motion = Motion::Transitioning {
            becoming_visible,
            started: now,
        };
    }

    /// Advance the animation to `now` and report what to draw.
    ///
    /// Once `elapsed >= ANIMATION_DURATION` the motion collapses to
    /// `Resting` and the center snaps to the exact terminal anchor, so
    /// repeated partial interpolation can never accumulate drift.
    pub fn update(&mut self, now: f64) -> RenderState {
        if let Motion::Transitioning { becoming_visible, started } = self.motion {
            let elapsed = now - started;
            let (from, to) = if becoming_visible {
                (self.origin, self.final_pos)
            } else {
                (self.final_pos, self.origin)
            };
            if elapsed < ANIMATION_DURATION {
                let t = (elapsed / ANIMATION_DURATION) as f32;
                self.center = from.lerp(to, t);
            } else {
                self.center = to;
                self.motion = Motion::Resting {
                    visible: becoming_visible,
                };
            }
        }
        RenderState {
            center: self.center,
            radius: self.current_radius(now),
            visible: self.is_drawn(),
        }
    }

    /// Displayed radius: swells linearly while hovered, capped at
    /// `radius * (1 + HOVER_GROWTH_CAP)`, and reverts the instant hover ends.
    pub fn current_radius(&self, now: f64) -> f32 {
        match (self.is_hovered, self.hover_started) {
            (true, Some(t0)) => {
                let grown = ((now - t0).max(0.0) as f32) * HOVER_GROWTH_RATE;
                self.radius + grown.min(self.radius * HOVER_GROWTH_CAP)
            }
            _ => self.radius,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

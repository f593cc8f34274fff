//! Pan/zoom state for the scene.
//!
//! Owns the scene-to-screen transform: direct gestures (drag, wheel,
//! pinch) mutate it immediately, while the zoom buttons and reset drive
//! short tweens advanced by the frame clock. A gesture or a new
//! operation supersedes any tween already in flight.

use egui::{Pos2, Vec2};

/// Scale bounds enforced on every zoom path.
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 8.0;

/// Multiplier applied by one zoom-in button press.
pub const ZOOM_STEP: f32 = 1.4;

/// Seconds for a button-driven zoom tween.
const STEP_DURATION: f32 = 0.3;

/// Seconds for the reset-to-identity tween.
const RESET_DURATION: f32 = 0.75;

/// Uniform scale followed by translation, mapping scene to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub k: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn apply(&self, p: Pos2) -> Pos2 {
        Pos2::new(p.x * self.k + self.tx, p.y * self.k + self.ty)
    }

    pub fn invert(&self, p: Pos2) -> Pos2 {
        Pos2::new((p.x - self.tx) / self.k, (p.y - self.ty) / self.k)
    }

    /// Rescale around a fixed screen-space anchor; the scene point under
    /// the anchor stays under it.
    fn zoomed(&self, factor: f32, anchor: Pos2) -> Self {
        let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = k / self.k;
        Self {
            k,
            tx: anchor.x - (anchor.x - self.tx) * ratio,
            ty: anchor.y - (anchor.y - self.ty) * ratio,
        }
    }
}

struct Tween {
    from: Transform,
    to: Transform,
    elapsed: f32,
    duration: f32,
}

/// Viewport controller: current transform plus an optional in-flight tween.
pub struct Viewport {
    transform: Transform,
    tween: Option<Tween>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            transform: Transform::IDENTITY,
            tween: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Immediate zoom from a wheel or pinch gesture, anchored at the cursor.
    pub fn zoom_at(&mut self, factor: f32, anchor: Pos2) {
        self.tween = None;
        self.transform = self.transform.zoomed(factor, anchor);
    }

    /// Immediate pan from a drag gesture.
    pub fn pan(&mut self, delta: Vec2) {
        self.tween = None;
        self.transform.tx += delta.x;
        self.transform.ty += delta.y;
    }

    /// Animated zoom-in step, anchored at the given screen point.
    pub fn zoom_in(&mut self, anchor: Pos2) {
        self.start_tween(self.transform.zoomed(ZOOM_STEP, anchor), STEP_DURATION);
    }

    /// Animated zoom-out step, anchored at the given screen point.
    pub fn zoom_out(&mut self, anchor: Pos2) {
        self.start_tween(self.transform.zoomed(1.0 / ZOOM_STEP, anchor), STEP_DURATION);
    }

    /// Animate back to the identity transform.
    pub fn reset(&mut self) {
        self.start_tween(Transform::IDENTITY, RESET_DURATION);
    }

    fn start_tween(&mut self, to: Transform, duration: f32) {
        self.tween = Some(Tween {
            from: self.transform,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    /// Advance the in-flight tween by `dt` seconds. Returns true while an
    /// animation is still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        tween.elapsed += dt;
        if tween.elapsed >= tween.duration {
            self.transform = tween.to;
            self.tween = None;
            return false;
        }
        let t = ease_cubic_in_out(tween.elapsed / tween.duration);
        self.transform = Transform {
            k: lerp(tween.from.k, tween.to.k, t),
            tx: lerp(tween.from.tx, tween.to.tx, t),
            ty: lerp(tween.from.ty, tween.to.ty, t),
        };
        true
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Symmetric cubic ease: slow start, slow finish.
fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

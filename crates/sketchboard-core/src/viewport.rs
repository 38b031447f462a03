//! Screen to world transform with wheel zoom and panning.

use crate::config::EngineConfig;
use kurbo::{Affine, Point, Vec2};
use serde::Serialize;

/// The view transform for the board.
///
/// `screen = world * scale + offset`. The scale always stays within
/// `min_scale..=max_scale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    /// Translation in screen pixels.
    offset: Vec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    /// Multiplicative zoom per wheel notch.
    zoom_step: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Viewport {
    /// Build from config. Out-of-range values fall back to the defaults.
    pub fn from_config(config: &EngineConfig) -> Self {
        let defaults = EngineConfig::default();
        let range_ok = config.min_scale > 0.0
            && config.min_scale <= config.max_scale
            && config.max_scale.is_finite();
        let (min_scale, max_scale) = if range_ok {
            (config.min_scale, config.max_scale)
        } else {
            log::warn!(
                "invalid zoom range {}..{}, using defaults",
                config.min_scale,
                config.max_scale
            );
            (defaults.min_scale, defaults.max_scale)
        };
        let zoom_step = if config.zoom_step > 1.0 && config.zoom_step.is_finite() {
            config.zoom_step
        } else {
            log::warn!("invalid zoom step {}, using default", config.zoom_step);
            defaults.zoom_step
        };
        Self {
            offset: Vec2::ZERO,
            scale: 1.0_f64.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            zoom_step,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale_range(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Set the scale directly, clamped into range.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
    }

    /// World to screen affine, for renderers.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Apply one wheel event at `screen`.
    ///
    /// Negative `delta_y` zooms in by `zoom_step`, positive zooms out by its
    /// inverse. Zero changes nothing. Returns whether a zoom was applied.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let factor = if delta_y < 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        self.zoom_at(screen, factor);
        true
    }

    /// Zoom by `factor`, keeping the world point under `screen` in place.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let world = self.to_world(screen);
        self.scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.offset = Vec2::new(
            screen.x - world.x * self.scale,
            screen.y - world.y * self.scale,
        );
    }

    /// Pan by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Back to identity.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
    }
}

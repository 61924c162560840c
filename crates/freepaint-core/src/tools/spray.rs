//! Spray can: scatters diamond dots around the pointer.

use super::ToolContext;
use crate::appearance::Appearance;
use crate::geometry::diamond_points;
use crate::input::PointerEvent;
use crate::path::DrawPath;
use crate::point::{Command, PathPoint};
use kurbo::{Point, Vec2};
use std::f64::consts::TAU;

/// Dots at this distance from the pointer or further have no size.
const MAX_DOT_SIZE: f64 = 10.0;

/// Deterministic splitmix64 generator.
#[derive(Debug, Clone)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Two independent standard normal samples (Box-Muller).
    fn next_gaussian_pair(&mut self) -> (f64, f64) {
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = TAU * u2;
        (r * theta.cos(), r * theta.sin())
    }
}

#[derive(Debug, Clone)]
pub struct SprayTool {
    rng: SplitMix64,
    committed: bool,
}

impl SprayTool {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SplitMix64 { state: seed },
            committed: false,
        }
    }

    pub fn init(&mut self) {
        self.committed = false;
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    pub fn take_committed(&mut self) -> bool {
        std::mem::take(&mut self.committed)
    }

    pub fn handle_event(&mut self, event: PointerEvent, ctx: &mut ToolContext<'_>) -> bool {
        let p = match event {
            PointerEvent::Down(p) => {
                self.committed = false;
                p
            }
            PointerEvent::Move(p) => p,
            PointerEvent::Up => return false,
        };

        let dots = self.spray(p, ctx.settings.spray_radius, ctx.settings.spray_density);
        if dots.len() < 2 {
            return false;
        }
        // Dots are painted solid in the stroke color.
        let appearance = Appearance::new(None, ctx.settings.stroke_color);
        let mut path = DrawPath::from_points(dots, true, appearance);
        path.cache_boundary();
        ctx.document.add_path(path);
        self.committed = true;
        true
    }

    /// Diamond dots with normally distributed offsets around `center`.
    /// Dots shrink with distance; those that would vanish are skipped.
    fn spray(&mut self, center: Point, radius: f64, density: usize) -> Vec<PathPoint> {
        let mut points = Vec::new();
        for _ in 0..density {
            let (gx, gy) = self.rng.next_gaussian_pair();
            let offset = Vec2::new(gx, gy) * radius;
            let size = (MAX_DOT_SIZE - offset.hypot()).max(0.0);
            if size <= 0.0 {
                continue;
            }
            let [top, right, bottom, left] = diamond_points(center + offset, size / 2.0);
            points.push(PathPoint::at(top).with_command(Command::Move));
            points.extend([right, bottom, left].map(|p| PathPoint::at(p).with_command(Command::Line)));
        }
        points
    }
}

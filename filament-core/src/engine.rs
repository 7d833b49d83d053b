//! The animation engine.
//!
//! The typical frame looks like:
//! 1. The host calls [`Engine::tick`] with the current timestamp.
//! 2. The engine spawns a new border line if the spawn interval has
//!    elapsed, advances every active line through its
//!    grow / erase / branch / remove lifecycle, appends any children
//!    produced by branching and drops fully erased lines.
//! 3. The host draws each line from `start` to `head`.

use crate::config::Config;
use crate::line::{Line, LineError};
use crate::math;
use glam::Vec2;
use log::{debug, warn};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

/// Progress sentinel assigned once an erase interpolation completes.
///
/// The eased progress itself bottoms out at exactly 0, which would
/// never satisfy the `progress < 0` removal check; dropping below zero
/// here makes removal reachable on the next pass.
const FULLY_ERASED: f32 = -1.0;

/// Owns the active line collection and drives the animation.
///
/// The engine is pure state plus an injected random source: the host
/// supplies monotonically increasing timestamps via [`Engine::tick`]
/// and renders the resulting segments. Width and height are the canvas
/// dimensions in pixels and must both be positive before the first
/// tick; lines are spawned from the border toward the center.
#[derive(Debug)]
pub struct Engine<R: Rng> {
    /// Active lines in spawn/branch order.
    pub lines: Vec<Line>,
    pub width: f32,
    pub height: f32,
    pub cfg: Config,

    rng: R,

    running: bool,
    /// Timestamp of the last automatic spawn; `None` arms the clock on
    /// the next tick.
    last_spawn_at: Option<f64>,
}

impl<R: Rng> Engine<R> {
    pub fn new(width: f32, height: f32, rng: R) -> Self {
        Self {
            lines: Vec::new(),
            width,
            height,
            cfg: Config::default(),
            rng,
            running: false,
            last_spawn_at: None,
        }
    }

    /// Begins periodic spawning and per-frame advancement.
    ///
    /// Re-entrant: calling `start` while already running only restarts
    /// the spawn clock. Frames are pushed in by the host, so there is
    /// no callback chain to duplicate.
    pub fn start(&mut self) {
        self.running = true;
        self.last_spawn_at = None;
    }

    /// Halts both spawning and advancement; [`Engine::tick`] becomes a
    /// no-op until [`Engine::start`] is called again. Active lines are
    /// kept and resume where they left off.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the animation to the given timestamp (milliseconds).
    ///
    /// Spawns a new border line whenever `cfg.spawn_interval_ms` has
    /// elapsed since the previous spawn, then updates every line:
    ///
    /// - Growing lines ease their progress from 0 toward 1 and move
    ///   `head` along the segment.
    /// - A line whose growth progress reaches 1 has its clock reset and
    ///   [`Line::erase`] called.
    /// - Erasing lines ease back toward 0. Once progress falls under
    ///   `cfg.branch_threshold` the branch decision is made (that frame
    ///   performs no position update); once it drops below 0 the line
    ///   is removed.
    ///
    /// Children created by branching join the collection at the end of
    /// the pass and are first advanced on the next tick.
    ///
    /// ### Parameters
    /// - `now_ms` - Current frame timestamp in milliseconds. Must not
    ///   decrease between calls.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }

        match self.last_spawn_at {
            None => self.last_spawn_at = Some(now_ms),
            Some(t) if now_ms - t >= self.cfg.spawn_interval_ms => {
                match self.spawn_line() {
                    Ok(line) => self.lines.push(line),
                    Err(err) => warn!("dropping spawned line: {err}"),
                }
                self.last_spawn_at = Some(now_ms);
            }
            Some(_) => {}
        }

        let mut spawned: Vec<Line> = Vec::new();
        let mut removed: Vec<usize> = Vec::new();

        for i in 0..self.lines.len() {
            let (erasing, progress, branched, elapsed) = {
                let line = &mut self.lines[i];
                let started = *line.started_at.get_or_insert(now_ms);
                (line.erasing, line.progress, line.branched, now_ms - started)
            };

            if erasing {
                if progress < self.cfg.branch_threshold && !branched {
                    // Branch decision frame; the position update waits
                    // until the next tick.
                    spawned.extend(self.branch(i));
                } else if progress < 0.0 {
                    removed.push(i);
                } else {
                    let line = &mut self.lines[i];
                    let t = (line.delta * elapsed) as f32;
                    let p = 1.0 - math::ease_in_out_quart(t);
                    line.head = line.start.lerp(line.end, p);
                    line.progress = if t >= 1.0 { FULLY_ERASED } else { p };
                }
            } else if (0.0..1.0).contains(&progress) {
                let line = &mut self.lines[i];
                let p = math::ease_in_out_quart((line.delta * elapsed) as f32);
                line.progress = p;
                line.head = line.start.lerp(line.end, p);
            } else if progress >= 1.0 {
                let line = &mut self.lines[i];
                // Restart the clock for the erase phase.
                line.started_at = Some(now_ms);
                line.erase();
            }
        }

        // Indices were collected in ascending order; removing from the
        // back keeps the remaining ones valid. An out-of-range index
        // here would be an internal-consistency bug and panics.
        for i in removed.into_iter().rev() {
            self.lines.remove(i);
        }
        self.lines.extend(spawned);
    }

    /// Makes the branch decision for the line at `index` and returns
    /// the children it produced.
    ///
    /// At most one decision is made per line: if the line has already
    /// branched this returns no children. Otherwise the line branches
    /// with probability `cfg.branch_chance / decay`; on success the
    /// half-circle around its directional vector is split into one or
    /// two equal sectors and each sector yields a candidate child from
    /// the branch origin (the retracting head's anchor while erasing,
    /// the endpoint otherwise). Each sector rotates an independent copy
    /// of the original direction, so branch angles are not chained.
    /// Candidates leaving the canvas are discarded without retry.
    ///
    /// ### Parameters
    /// - `index` - Index of the line in [`Engine::lines`].
    ///
    /// ### Returns
    /// The child lines, each with `decay = parent.decay +
    /// cfg.decay_step`. The caller is responsible for appending them to
    /// the collection.
    pub fn branch(&mut self, index: usize) -> Vec<Line> {
        let (dir, origin, decay) = {
            let line = &mut self.lines[index];
            if line.branched {
                return Vec::new();
            }
            line.branched = true;

            let origin = if line.erasing { line.start } else { line.end };
            (line.direction(), origin, line.decay)
        };

        // Branch probability shrinks as decay grows.
        if self.rng.random::<f32>() > self.cfg.branch_chance / decay {
            return Vec::new();
        }

        let count = self
            .rng
            .random_range(self.cfg.min_branches..=self.cfg.max_branches);
        let sector = (2.0 * FRAC_PI_2) / count as f32;

        let mut children = Vec::with_capacity(count as usize);
        for k in 0..count {
            let lo = -FRAC_PI_2 + sector * k as f32;
            let v = math::random_rotate(dir, lo, lo + sector, &mut self.rng);
            let v = v.normalize() * self.rng.random_range(self.cfg.min_length..self.cfg.max_length);
            let end = origin + v;

            if !(self.contains(origin) && self.contains(end)) {
                continue;
            }

            let duration = self
                .rng
                .random_range(self.cfg.min_duration_ms..self.cfg.max_duration_ms);
            if let Ok(child) = Line::new(origin, end, decay + self.cfg.decay_step, duration) {
                children.push(child);
            }
        }

        debug!("line {index} branched into {} children", children.len());
        children
    }

    /// Randomly generates a line directed from the border of the canvas
    /// toward its center.
    ///
    /// The border-to-center direction is jittered by a random angle in
    /// `[-cfg.spawn_jitter, cfg.spawn_jitter)`, normalized and scaled
    /// to a random length in `[cfg.min_length, cfg.max_length)`.
    pub fn spawn_line(&mut self) -> Result<Line, LineError> {
        let p = self.border_point();
        let v = self.vector_to_center(p);

        let v = math::random_rotate(v, -self.cfg.spawn_jitter, self.cfg.spawn_jitter, &mut self.rng);
        let v = v.normalize() * self.rng.random_range(self.cfg.min_length..self.cfg.max_length);

        let duration = self
            .rng
            .random_range(self.cfg.min_duration_ms..self.cfg.max_duration_ms);

        debug!("spawning line at ({}, {})", p.x, p.y);
        Line::new(p, p + v, 1.0, duration)
    }

    /// Returns a random point on the border of the canvas, uniformly
    /// distributed over arc length.
    ///
    /// A scalar is drawn from `[0, 2w + 2h)` and mapped onto the four
    /// edges in order top, right, bottom, left, so each edge is hit
    /// with probability proportional to its length.
    pub fn border_point(&mut self) -> Vec2 {
        let w = self.width;
        let h = self.height;
        let x = self.rng.random_range(0.0..2.0 * (w + h));

        // Top
        if x < w {
            return Vec2::new(x, 0.0);
        }

        // Right
        if x < w + h {
            return Vec2::new(w, x - w);
        }

        // Bottom
        if x < 2.0 * w + h {
            return Vec2::new(x - (w + h), h);
        }

        // Left
        Vec2::new(0.0, x - (2.0 * w + h))
    }

    /// Returns the vector from the given point to the canvas center.
    pub fn vector_to_center(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0) - p
    }

    /// Whether a point lies inside `[0, width) x [0, height)`.
    ///
    /// NaN coordinates fail every comparison and are rejected too.
    fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width && p.y < self.height
    }
}

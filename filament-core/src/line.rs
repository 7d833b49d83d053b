use glam::Vec2;
use thiserror::Error;

/// Error raised when constructing a [`Line`] from invalid geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("non-finite coordinate in line endpoints")]
    NonFiniteCoordinate,
}

/// A single animated segment.
///
/// A line first grows from `start` toward `end`, then reverses and
/// retracts. `head` is the currently rendered tip of the segment; hosts
/// draw from `start` to `head` in every state.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    /// Current head position; equals `start` until the first update.
    pub head: Vec2,
    /// Interpolation progress. Rises 0 -> 1 while growing, falls back
    /// toward 0 while erasing, and goes negative once fully erased.
    pub progress: f32,
    /// Progress per millisecond, `1 / duration`.
    pub delta: f64,
    /// Branch-damping factor, >= 1. Each branch generation inherits a
    /// larger decay, so recursive branching dies out.
    pub decay: f32,
    pub erasing: bool,
    /// Whether the branch decision has already been made.
    pub branched: bool,
    /// Timestamp (ms) of the first frame this line was updated on,
    /// recorded lazily. Reset when the erase phase begins.
    pub started_at: Option<f64>,
}

impl Line {
    /// Creates a line from `start` to `end`.
    ///
    /// `duration_ms` is the time the growth (and later the erase)
    /// interpolation takes; `decay` must be at least 1.
    ///
    /// ### Errors
    /// Returns [`LineError::NonFiniteCoordinate`] if any endpoint
    /// coordinate is NaN or infinite.
    pub fn new(start: Vec2, end: Vec2, decay: f32, duration_ms: f64) -> Result<Self, LineError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(LineError::NonFiniteCoordinate);
        }

        Ok(Self {
            start,
            end,
            head: start,
            progress: 0.0,
            delta: 1.0 / duration_ms,
            decay,
            erasing: false,
            branched: false,
            started_at: None,
        })
    }

    /// Begins erasing the line.
    ///
    /// Swaps the endpoints, resets `progress` to 1 and moves the head
    /// to the post-swap `end`, so the segment retracts along the path
    /// it grew. Called exactly once, when growth progress reaches 1.
    pub fn erase(&mut self) {
        self.reverse();
        self.progress = 1.0;
        self.head = self.end;
        self.erasing = true;
    }

    /// Swaps the start and end points.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    /// Returns the directional vector of the segment.
    ///
    /// While growing this is the direction of growth, `end - start`.
    /// While erasing the endpoints have been swapped and the direction
    /// is `start - end`, the base used for branch angles.
    pub fn direction(&self) -> Vec2 {
        if self.erasing {
            self.start - self.end
        } else {
            self.end - self.start
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_line_defaults() {
        let l = Line::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), 1.0, 1000.0).unwrap();
        assert_eq!(l.progress, 0.0);
        assert!(!l.erasing);
        assert!(!l.branched);
        assert!(l.started_at.is_none());
        // Head starts at the spawn point.
        assert_eq!(l.head, Vec2::new(1.0, 2.0));
        assert_eq!(l.delta, 1.0 / 1000.0);
    }

    #[test]
    fn construction_rejects_non_finite_coordinates() {
        let good = Vec2::new(1.0, 1.0);
        for bad in [
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(0.0, f32::NAN),
            Vec2::new(f32::INFINITY, 0.0),
        ] {
            assert_eq!(
                Line::new(bad, good, 1.0, 1000.0),
                Err(LineError::NonFiniteCoordinate)
            );
            assert_eq!(
                Line::new(good, bad, 1.0, 1000.0),
                Err(LineError::NonFiniteCoordinate)
            );
        }
    }

    #[test]
    fn erase_swaps_endpoints_and_resets_progress() {
        let mut l = Line::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0), 1.0, 1000.0).unwrap();
        l.erase();

        assert!(l.erasing);
        assert_eq!(l.progress, 1.0);
        // Post-erase start is the pre-erase end and vice versa.
        assert_eq!(l.start, Vec2::new(100.0, 50.0));
        assert_eq!(l.end, Vec2::new(0.0, 0.0));
        // Head sits at the post-swap end, matching progress = 1.
        assert_eq!(l.head, l.end);
    }

    #[test]
    fn direction_follows_erase_state() {
        let mut l = Line::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 1.0, 1000.0).unwrap();
        assert_eq!(l.direction(), Vec2::new(10.0, 0.0));

        l.erase();
        // Endpoints are swapped, so start - end is the growth direction again.
        assert_eq!(l.direction(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn reverse_is_an_involution() {
        let mut l = Line::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), 1.0, 1000.0).unwrap();
        l.reverse();
        assert_eq!(l.start, Vec2::new(3.0, 4.0));
        l.reverse();
        assert_eq!(l.start, Vec2::new(1.0, 2.0));
        assert_eq!(l.end, Vec2::new(3.0, 4.0));
    }
}

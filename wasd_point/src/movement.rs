//! Held-key tracking and time-stepped movement of a single point.
//!
//! `MovementState` owns the set of currently held keys and the point's
//! position. Each frame the owner calls [`MovementState::tick`] (or
//! [`MovementState::apply_movement`] with a measured delta) and the point
//! advances along the normalized direction of the held keys at
//! `movement_speed` units per second, clamped to [`Bounds`].

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::math::Vec2;

/// Speed used when none (or an unusable one) is supplied, in units per second.
pub const DEFAULT_SPEED: f32 = 2.0;

/// Half-width of the default clamp range on both axes.
pub const DEFAULT_EXTENT: f32 = 10.0;

/// One of the four recognized movement keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Up,
    Left,
    Down,
    Right,
}

impl MovementKey {
    pub const ALL: [MovementKey; 4] = [Self::Up, Self::Left, Self::Down, Self::Right];

    /// Map a character to a movement key, ignoring ASCII case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Up),
            'a' => Some(Self::Left),
            's' => Some(Self::Down),
            'd' => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Up => 'w',
            Self::Left => 'a',
            Self::Down => 's',
            Self::Right => 'd',
        }
    }

    /// Unit direction contributed by this key (+y is up).
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Axis-aligned clamp range for the point's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Build bounds from two corners. Components are reordered so that
    /// `min <= max` on each axis.
    ///
    /// Non-finite corners are replaced by [`Bounds::default`].
    pub fn new(a: Vec2, b: Vec2) -> Self {
        if ![a.x, a.y, b.x, b.y].iter().all(|c| c.is_finite()) {
            log::warn!("Ignoring bounds {:?}..{:?}; using default", a, b);
            return Self::default();
        }
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// `[-extent, extent]` on both axes.
    ///
    /// A non-finite extent is replaced by [`DEFAULT_EXTENT`].
    pub fn symmetric(extent: f32) -> Self {
        let e = if extent.is_finite() {
            extent.abs()
        } else {
            log::warn!(
                "Ignoring bound extent {}; using default {}",
                extent,
                DEFAULT_EXTENT
            );
            DEFAULT_EXTENT
        };
        Self {
            min: Vec2::new(-e, -e),
            max: Vec2::new(e, e),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }

    /// Hard floor/ceiling on each axis. No bounce, no wrap.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::symmetric(DEFAULT_EXTENT)
    }
}

/// Held keys, position and timing for the steered point.
///
/// None of the operations fail or panic, whatever characters or elapsed
/// values they are given.
#[derive(Clone, Debug)]
pub struct MovementState {
    pressed_keys: HashSet<char>,
    position: Vec2,
    movement_speed: f32,
    bounds: Bounds,
    should_quit: bool,
    last_update_time: Instant,
    last_delta: Duration,
    elapsed_time: Duration,
}

impl MovementState {
    /// Default speed, at the origin, inside the default bounds.
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            position: Vec2::ZERO,
            movement_speed: DEFAULT_SPEED,
            bounds: Bounds::default(),
            should_quit: false,
            last_update_time: Instant::now(),
            last_delta: Duration::ZERO,
            elapsed_time: Duration::ZERO,
        }
    }

    /// Override the speed in units per second.
    ///
    /// Zero, negative or non-finite speeds are replaced by [`DEFAULT_SPEED`].
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.movement_speed = speed;
        } else {
            log::warn!(
                "Ignoring movement speed {}; using default {}",
                speed,
                DEFAULT_SPEED
            );
            self.movement_speed = DEFAULT_SPEED;
        }
        self
    }

    /// Override the starting position. It is clamped to the current bounds.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = self.bounds.clamp(position);
        self
    }

    /// Override the clamp range. The current position is re-clamped.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self.position = bounds.clamp(self.position);
        self
    }

    /// Mark a key as held. The key is stored lower-cased; adding it twice
    /// has no further effect.
    pub fn add_key(&mut self, key: char) {
        let was_moving = self.is_moving();
        self.pressed_keys.insert(key.to_ascii_lowercase());
        if !was_moving && self.is_moving() {
            log::debug!("Movement started ({:?})", key);
        }
    }

    /// Mark a key as released. Releasing a key that is not held is a no-op.
    pub fn remove_key(&mut self, key: char) {
        let was_moving = self.is_moving();
        self.pressed_keys.remove(&key.to_ascii_lowercase());
        if was_moving && !self.is_moving() {
            log::debug!("Movement stopped");
        }
    }

    /// Release every key, e.g. after the window loses focus.
    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    /// Direction of travel for the currently held keys.
    ///
    /// Opposite keys cancel to exactly zero on their axis. A two-axis
    /// result is scaled to unit length so diagonal travel is no faster than
    /// straight travel. Unrecognized keys are skipped. The result is not
    /// yet scaled by speed or time.
    pub fn calculate_movement_vector(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        for key in self.pressed_keys.iter().copied().filter_map(MovementKey::from_char) {
            direction += key.direction();
        }

        if direction.x != 0.0 && direction.y != 0.0 {
            direction.normalized()
        } else {
            direction
        }
    }

    /// Advance the point by `elapsed_seconds` and return its new position.
    ///
    /// Negative and NaN elapsed values count as zero. Arbitrarily large
    /// values (including infinity) land the point on the boundary.
    pub fn apply_movement(&mut self, elapsed_seconds: f32) -> Vec2 {
        let elapsed = if elapsed_seconds.is_nan() || elapsed_seconds < 0.0 {
            0.0
        } else {
            elapsed_seconds
        };

        let direction = self.calculate_movement_vector();
        if !direction.is_zero() {
            let distance = self.movement_speed * elapsed;

            // Axes with no direction are left alone so an infinite distance
            // never turns 0 * inf into NaN.
            let mut next = self.position;
            if direction.x != 0.0 {
                next.x += direction.x * distance;
            }
            if direction.y != 0.0 {
                next.y += direction.y * distance;
            }
            self.position = self.bounds.clamp(next);
        }

        self.last_delta = Duration::try_from_secs_f32(elapsed).unwrap_or(Duration::MAX);
        self.elapsed_time = self.elapsed_time.saturating_add(self.last_delta);

        self.position
    }

    /// Measure the time since the previous tick and apply it.
    ///
    /// An instant earlier than the previous tick counts as zero elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec2 {
        let delta = now.saturating_duration_since(self.last_update_time);
        self.last_update_time = now;
        self.apply_movement(delta.as_secs_f32())
    }

    /// Ask the owning loop to stop. Stays set until [`reset`](Self::reset).
    pub fn request_quit(&mut self) {
        if !self.should_quit {
            log::info!("Quit requested");
        }
        self.should_quit = true;
    }

    /// Release all keys, return to the origin, clear the quit flag and
    /// restart timing from now.
    pub fn reset(&mut self) {
        self.reset_to(Vec2::ZERO);
    }

    /// Like [`reset`](Self::reset) but places the point at `position`
    /// (clamped to the bounds).
    pub fn reset_to(&mut self, position: Vec2) {
        self.pressed_keys.clear();
        self.position = self.bounds.clamp(position);
        self.should_quit = false;
        self.last_update_time = Instant::now();
        self.last_delta = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pressed_keys(&self) -> &HashSet<char> {
        &self.pressed_keys
    }

    pub fn is_key_pressed(&self, key: char) -> bool {
        self.pressed_keys.contains(&key.to_ascii_lowercase())
    }

    /// True while any key is held.
    pub fn is_moving(&self) -> bool {
        !self.pressed_keys.is_empty()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn last_update_time(&self) -> Instant {
        self.last_update_time
    }

    /// Elapsed time applied by the most recent update.
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Total elapsed time applied since construction or the last reset.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new()
    }
}

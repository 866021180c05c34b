//! Temporal range scrubber
//!
//! A horizontal track with two handles selecting a span of years. Pointer
//! positions are in pixels along the track; every change to the selection
//! updates the local state at once and is pushed into a [`DebouncedCommit`],
//! which reports the range upstream only after the quiet period.

use crate::debounce::DebouncedCommit;
use alumni_core::YearRange;
use alumni_core::config::ScrubberConfig;
use serde::Serialize;
use tokio::time::Duration;
use tracing::{debug, trace};

/// One of the two handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// First handle, initially on the lower year
    Start,
    /// Second handle, initially on the upper year
    End,
}

/// Interaction state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ScrubberState {
    /// No pointer held
    #[default]
    Idle,
    /// A handle follows the pointer
    Dragging(Handle),
}

/// Selection mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrubberMode {
    /// Both handles move together and select one year
    Single,
    /// Handles move independently
    #[default]
    Range,
}

/// Pixel geometry of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Track {
    /// Left edge
    pub left: f64,
    /// Width
    pub width: f64,
}

impl Track {
    /// Track from its left edge and width
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Right edge
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width.max(0.0)
    }
}

/// Pointer or touch input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press at `x`
    Down(f64),
    /// Move to `x`
    Move(f64),
    /// Release (mouse up or touch end)
    Up,
}

/// Pixel positions of both handles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandlePositions {
    /// Start handle
    pub start: f64,
    /// End handle
    pub end: f64,
}

/// Year span selector driven by pointer input
#[derive(Debug)]
pub struct TemporalScrubber {
    min_year: i32,
    max_year: i32,
    track: Track,
    hit_radius: f64,
    tick_interval: i32,
    start: i32,
    end: i32,
    mode: ScrubberMode,
    state: ScrubberState,
    commit: Option<DebouncedCommit<YearRange>>,
}

impl TemporalScrubber {
    /// Scrubber over `[min_year, max_year]` with both handles at the bounds
    #[must_use]
    pub fn new(min_year: i32, max_year: i32, track: Track) -> Self {
        let (min_year, max_year) = (min_year.min(max_year), min_year.max(max_year));
        Self {
            min_year,
            max_year,
            track,
            hit_radius: 12.0,
            tick_interval: 5,
            start: min_year,
            end: max_year,
            mode: ScrubberMode::Range,
            state: ScrubberState::Idle,
            commit: None,
        }
    }

    /// Scrubber bounded and tuned by the `[scrubber]` section
    #[must_use]
    pub fn from_config(config: &ScrubberConfig, current_year: i32, track: Track) -> Self {
        let max_year = config.max_year.unwrap_or(current_year).max(config.min_year);
        let mut scrubber = Self::new(config.min_year, max_year, track);
        scrubber.hit_radius = config.handle_hit_radius;
        scrubber.tick_interval = config.tick_interval;
        scrubber
    }

    /// Report committed ranges to `on_commit` after `delay` of quiet
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn with_commit(
        mut self,
        delay: Duration,
        on_commit: impl Fn(YearRange) + Send + Sync + 'static,
    ) -> Self {
        self.commit = Some(DebouncedCommit::new(delay, on_commit));
        self
    }

    /// Start in `mode`
    #[must_use]
    pub fn with_mode(mut self, mode: ScrubberMode) -> Self {
        self.apply_mode(mode);
        self
    }

    /// Current selection, always ordered
    #[must_use]
    pub const fn range(&self) -> YearRange {
        YearRange::new(self.start, self.end)
    }

    /// Interaction state
    #[must_use]
    pub const fn state(&self) -> ScrubberState {
        self.state
    }

    /// Selection mode
    #[must_use]
    pub const fn mode(&self) -> ScrubberMode {
        self.mode
    }

    /// Selectable bounds
    #[must_use]
    pub const fn bounds(&self) -> YearRange {
        YearRange::new(self.min_year, self.max_year)
    }

    /// Replace the track geometry after a resize
    pub const fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    /// Year under pixel `x`, clamped to the track
    #[must_use]
    pub fn year_at(&self, x: f64) -> i32 {
        if self.track.width <= 0.0 {
            return self.min_year;
        }
        let x = x.clamp(self.track.left, self.track.right());
        let fraction = (x - self.track.left) / self.track.width;
        let span = f64::from(self.max_year - self.min_year);
        #[allow(clippy::cast_possible_truncation)]
        let offset = (fraction * span).round() as i32;
        (self.min_year + offset).clamp(self.min_year, self.max_year)
    }

    /// Pixel position of `year` on the track
    #[must_use]
    pub fn x_of(&self, year: i32) -> f64 {
        let span = self.max_year - self.min_year;
        if span == 0 {
            return self.track.left;
        }
        let fraction = f64::from(year.clamp(self.min_year, self.max_year) - self.min_year)
            / f64::from(span);
        fraction.mul_add(self.track.width, self.track.left)
    }

    /// Pixel positions of both handles
    #[must_use]
    pub fn handle_positions(&self) -> HandlePositions {
        HandlePositions {
            start: self.x_of(self.start),
            end: self.x_of(self.end),
        }
    }

    /// Years carrying a tick mark
    #[must_use]
    pub fn ticks(&self) -> Vec<i32> {
        if self.tick_interval <= 0 {
            return Vec::new();
        }
        let first = self.min_year + (self.tick_interval - self.min_year.rem_euclid(self.tick_interval))
            % self.tick_interval;
        (first..=self.max_year)
            .step_by(usize::try_from(self.tick_interval).unwrap_or(1))
            .collect()
    }

    /// Feed one pointer event; returns true when the selection changed
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(x) => self.pointer_down(x),
            PointerEvent::Move(x) => self.pointer_move(x),
            PointerEvent::Up => {
                self.pointer_up();
                false
            }
        }
    }

    /// Press at `x`: grab a handle, or treat it as a click on the track
    pub fn pointer_down(&mut self, x: f64) -> bool {
        if self.state != ScrubberState::Idle {
            return false;
        }
        let positions = self.handle_positions();
        let nearest = closer_handle(x, positions);
        let distance = match nearest {
            Handle::Start => (x - positions.start).abs(),
            Handle::End => (x - positions.end).abs(),
        };

        if distance <= self.hit_radius {
            trace!(handle = ?nearest, "Handle grabbed");
            self.state = ScrubberState::Dragging(nearest);
            false
        } else {
            self.track_click(x)
        }
    }

    /// Move the dragged handle to `x`
    pub fn pointer_move(&mut self, x: f64) -> bool {
        match self.state {
            ScrubberState::Idle => false,
            ScrubberState::Dragging(handle) => {
                let year = self.year_at(x);
                self.place(handle, year)
            }
        }
    }

    /// Release the dragged handle
    pub fn pointer_up(&mut self) {
        if let ScrubberState::Dragging(handle) = self.state {
            trace!(?handle, "Handle released");
        }
        self.state = ScrubberState::Idle;
    }

    /// Move the pixel-closer handle (both in single mode) to the year at `x`
    pub fn track_click(&mut self, x: f64) -> bool {
        let handle = closer_handle(x, self.handle_positions());
        let year = self.year_at(x);
        self.place(handle, year)
    }

    /// Switch mode; entering single mode collapses onto the start year
    pub fn set_mode(&mut self, mode: ScrubberMode) -> bool {
        let changed = self.apply_mode(mode);
        if changed {
            self.push_commit();
        }
        changed
    }

    /// Adopt a range chosen elsewhere; ignored while dragging
    pub fn sync(&mut self, range: YearRange) -> bool {
        if self.state != ScrubberState::Idle {
            debug!(%range, "Ignoring range sync during drag");
            return false;
        }
        let start = range.start.clamp(self.min_year, self.max_year);
        let end = match self.mode {
            ScrubberMode::Single => start,
            ScrubberMode::Range => range.end.clamp(self.min_year, self.max_year),
        };
        let changed = (start, end) != (self.start, self.end);
        self.start = start;
        self.end = end;
        changed
    }

    /// Drop a pending commit, e.g. when the parent unmounts
    pub fn cancel_pending(&self) {
        if let Some(commit) = &self.commit {
            commit.cancel();
        }
    }

    fn apply_mode(&mut self, mode: ScrubberMode) -> bool {
        self.mode = mode;
        if mode == ScrubberMode::Single {
            let year = self.range().start;
            let changed = (self.start, self.end) != (year, year);
            self.start = year;
            self.end = year;
            changed
        } else {
            false
        }
    }

    fn place(&mut self, handle: Handle, year: i32) -> bool {
        let (start, end) = match (self.mode, handle) {
            (ScrubberMode::Single, _) => (year, year),
            (ScrubberMode::Range, Handle::Start) => (year, self.end),
            (ScrubberMode::Range, Handle::End) => (self.start, year),
        };
        if (start, end) == (self.start, self.end) {
            return false;
        }
        self.start = start;
        self.end = end;
        self.push_commit();
        true
    }

    fn push_commit(&self) {
        if let Some(commit) = &self.commit {
            commit.push(self.range());
        }
    }
}

fn closer_handle(x: f64, positions: HandlePositions) -> Handle {
    let to_start = (x - positions.start).abs();
    let to_end = (x - positions.end).abs();
    let tied = (to_start - to_end).abs() < f64::EPSILON;
    if to_start < to_end || (tied && x <= positions.start) {
        Handle::Start
    } else {
        Handle::End
    }
}

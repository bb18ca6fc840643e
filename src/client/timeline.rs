//! Year navigator for the timeline card.

/// Earliest year shown on the timeline
pub const FIRST_YEAR: u32 = 1800;

/// Latest year shown on the timeline
pub const LAST_YEAR: u32 = 2025;

/// Horizontal drag distance, in pixels, that counts as a swipe
pub const SWIPE_THRESHOLD_PX: f64 = 80.0;

/// A year-change event from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Jump(u32),
}

impl Navigation {
    /// Maps a keyboard key name onto a navigation event.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "ArrowUp" | "PageUp" => Some(Navigation::Previous),
            "ArrowRight" | "ArrowDown" | "PageDown" => Some(Navigation::Next),
            "Home" => Some(Navigation::Jump(FIRST_YEAR)),
            "End" => Some(Navigation::Jump(LAST_YEAR)),
            _ => None,
        }
    }

    /// Maps a finished horizontal drag onto a navigation event.
    ///
    /// Dragging left reveals the next year, dragging right the previous one.
    /// Drags shorter than [`SWIPE_THRESHOLD_PX`] snap back.
    pub fn from_swipe(offset_px: f64) -> Option<Self> {
        if offset_px <= -SWIPE_THRESHOLD_PX {
            Some(Navigation::Next)
        } else if offset_px >= SWIPE_THRESHOLD_PX {
            Some(Navigation::Previous)
        } else {
            None
        }
    }
}

/// Current position on the `FIRST_YEAR..=LAST_YEAR` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    year: u32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self { year: LAST_YEAR }
    }
}

impl Timeline {
    /// Starts at `year`, clamped into range.
    pub fn new(year: u32) -> Self {
        Self {
            year: year.clamp(FIRST_YEAR, LAST_YEAR),
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn is_first(&self) -> bool {
        self.year == FIRST_YEAR
    }

    pub fn is_last(&self) -> bool {
        self.year == LAST_YEAR
    }

    /// 1-based position and total number of years.
    pub fn position(&self) -> (u32, u32) {
        (self.year - FIRST_YEAR + 1, LAST_YEAR - FIRST_YEAR + 1)
    }

    /// Moves one year back. Returns whether the year changed.
    pub fn previous(&mut self) -> bool {
        self.jump(self.year.saturating_sub(1))
    }

    /// Moves one year forward. Returns whether the year changed.
    pub fn next(&mut self) -> bool {
        self.jump(self.year.saturating_add(1))
    }

    /// Moves to `year`, clamped into range. Returns whether the year changed.
    pub fn jump(&mut self, year: u32) -> bool {
        let target = year.clamp(FIRST_YEAR, LAST_YEAR);
        let changed = target != self.year;
        self.year = target;
        changed
    }

    pub fn apply(&mut self, navigation: Navigation) -> bool {
        match navigation {
            Navigation::Previous => self.previous(),
            Navigation::Next => self.next(),
            Navigation::Jump(year) => self.jump(year),
        }
    }
}

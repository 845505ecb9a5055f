//! User input mapping
//!
//! Turns raw host input (key names, touch coordinates) into navigation
//! directions. Everything here is stateless except the [`SwipeTracker`], which
//! remembers where the current touch started.

/// Default horizontal distance (in CSS pixels) a touch must travel to count as a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Navigation direction, equivalent to a step of `+1` or `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Step to the next item (`+1`)
    Forward,
    /// Step to the previous item (`-1`)
    Backward,
}

impl Direction {
    /// Apply the step to `current` within a collection of `len` items, wrapping
    ///
    /// `len` must be non-zero.
    pub fn apply(self, current: usize, len: usize) -> usize {
        match self {
            Self::Forward => (current + 1) % len,
            Self::Backward => (current + len - 1) % len,
        }
    }
}

/// Keys the carousel and lightbox react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// `ArrowLeft`
    ArrowLeft,
    /// `ArrowRight`
    ArrowRight,
    /// `Escape`
    Escape,
    /// The space bar
    Space,
    /// Anything else
    Other,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Escape" | "Esc" => Self::Escape,
            " " | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    /// Navigation direction for arrow keys
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::ArrowLeft => Some(Direction::Backward),
            Self::ArrowRight => Some(Direction::Forward),
            _ => None,
        }
    }
}

/// Horizontal swipe detector
///
/// A swipe is `start - end` along x. Travelling left (positive difference)
/// goes forward, travelling right goes backward. Movements not exceeding the
/// threshold are ignored.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start_x: Option<f32>,
}

impl SwipeTracker {
    /// Create a tracker with the given threshold in pixels
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    /// Record where a touch started
    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish a touch and return the swipe direction, if any
    ///
    /// A `touchend` without a matching `touchstart` is ignored.
    pub fn touch_end(&mut self, x: f32) -> Option<Direction> {
        let start = self.start_x.take()?;
        let diff = start - x;

        if diff.abs() > self.threshold {
            if diff > 0.0 {
                Some(Direction::Forward)
            } else {
                Some(Direction::Backward)
            }
        } else {
            None
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_wraps() {
        assert_eq!(Direction::Forward.apply(2, 3), 0);
        assert_eq!(Direction::Backward.apply(0, 3), 2);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(NavKey::from_key_name("ArrowLeft").direction(), Some(Direction::Backward));
        assert_eq!(NavKey::from_key_name("ArrowRight").direction(), Some(Direction::Forward));
        assert_eq!(NavKey::from_key_name(" "), NavKey::Space);
        assert_eq!(NavKey::from_key_name("Escape").direction(), None);
        assert_eq!(NavKey::from_key_name("a"), NavKey::Other);
    }

    #[test]
    fn test_swipe_left_goes_forward() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(300.0);
        assert_eq!(swipe.touch_end(200.0), Some(Direction::Forward));
    }

    #[test]
    fn test_swipe_right_goes_backward() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(100.0);
        assert_eq!(swipe.touch_end(180.0), Some(Direction::Backward));
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(100.0);
        // Exactly the threshold does not count
        assert_eq!(swipe.touch_end(50.0), None);
    }

    #[test]
    fn test_touch_end_without_start_ignored() {
        let mut swipe = SwipeTracker::new(10.0);
        assert_eq!(swipe.touch_end(500.0), None);
        swipe.touch_start(0.0);
        assert!(swipe.touch_end(100.0).is_some());
        // The start is consumed by the first end
        assert_eq!(swipe.touch_end(300.0), None);
    }
}

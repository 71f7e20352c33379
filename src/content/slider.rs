use std::time::Duration;

/// Default time each slide stays on screen.
pub const SLIDE_INTERVAL: Duration = Duration::from_secs(6);

pub const EMPTY_SLIDER_TITLE: &str = "Slider Boş";
pub const EMPTY_SLIDER_MESSAGE: &str =
    "Admin panelinden etkinlik oluşturup \"Show in Slider\" seçeneğini işaretleyin.";

/// Position of the home slider.
///
/// `Showing` always holds `index < len`; there is no state for an empty
/// slider with a current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderState {
    #[default]
    Empty,
    Showing { index: usize, len: usize },
}

impl SliderState {
    pub fn new(len: usize) -> Self {
        if len == 0 {
            SliderState::Empty
        } else {
            SliderState::Showing { index: 0, len }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SliderState::Empty => 0,
            SliderState::Showing { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SliderState::Empty)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            SliderState::Empty => None,
            SliderState::Showing { index, .. } => Some(*index),
        }
    }

    /// Advance on timer expiry.
    pub fn tick(self) -> Self {
        self.next()
    }

    pub fn next(self) -> Self {
        match self {
            SliderState::Empty => self,
            SliderState::Showing { index, len } => SliderState::Showing {
                index: (index + 1) % len,
                len,
            },
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SliderState::Empty => self,
            SliderState::Showing { index, len } => SliderState::Showing {
                index: (index + len - 1) % len,
                len,
            },
        }
    }

    /// Jump to slide `target`. Out-of-range targets are ignored.
    pub fn jump(self, target: usize) -> Self {
        match self {
            SliderState::Showing { len, .. } if target < len => {
                SliderState::Showing { index: target, len }
            }
            _ => self,
        }
    }

    /// Restart from the first slide after the record set changed.
    pub fn reset(self, len: usize) -> Self {
        Self::new(len)
    }

    /// Whether the rotation timer should be running.
    pub fn timer_active(&self) -> bool {
        !self.is_empty()
    }
}

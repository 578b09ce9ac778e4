//! Back-to-top control: visibility rule and the eased scroll animation.

pub const SCROLL_DURATION_MS: f64 = 600.0;
/// The control appears once the viewport bottom is this close to the end.
pub const BOTTOM_THRESHOLD: f64 = 10.0;

pub fn back_to_top_visible(scroll_top: f64, viewport_height: f64, document_height: f64) -> bool {
    scroll_top + viewport_height >= document_height - BOTTOM_THRESHOLD
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// One scroll-to-top run. Overlapping runs are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    start_y: f64,
    started_at: f64,
    duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub y: f64,
    pub finished: bool,
}

impl ScrollAnimation {
    pub fn new(start_y: f64, started_at: f64) -> Self {
        Self::with_duration(start_y, started_at, SCROLL_DURATION_MS)
    }

    pub fn with_duration(start_y: f64, started_at: f64, duration: f64) -> Self {
        Self {
            start_y,
            started_at,
            duration,
        }
    }

    /// Scroll position for a frame timestamp. Progress is clamped to [0, 1];
    /// frame timestamps may precede the start time slightly.
    pub fn frame(&self, now_ms: f64) -> ScrollFrame {
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((now_ms - self.started_at) / self.duration).clamp(0.0, 1.0)
        };
        ScrollFrame {
            y: self.start_y * (1.0 - ease_out_cubic(progress)),
            finished: progress >= 1.0,
        }
    }
}

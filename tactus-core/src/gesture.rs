//! Gesture classification from contact movement history
//!
//! Each contact keeps a sliding window of recent samples in device
//! coordinates. Classification runs on every sample; the result only
//! ever selects a display color, so a misclassification is cosmetic.
//!
//! Two reading gestures are recognized:
//!
//! - **Scrubbing**: the finger stays on one spot horizontally and
//!   oscillates vertically (re-reading a character).
//! - **Regression**: the finger moves forward along a line, then jumps
//!   back (re-reading a word).

use heapless::{Deque, FnvIndexMap, Vec};
use tactus_protocol::Gesture;

/// Sliding window length in milliseconds
pub const GESTURE_WINDOW_MS: u32 = 1000;

/// Minimum samples in the window before classification is attempted
pub const MIN_SAMPLES: usize = 5;

/// Samples kept per contact; the oldest is evicted first
const MAX_SAMPLES: usize = 32;

/// Tracked contacts (matches the contact table capacity)
const MAX_TRACKED: usize = 16;

// Classification thresholds, in device coordinate units
const SCRUB_MAX_X_RANGE: i32 = 25;
const SCRUB_MIN_CROSSINGS: usize = 2;
const REGRESSION_MAX_Y_RANGE: i32 = 50;
const REGRESSION_MIN_STEP: i32 = 5;

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: i32,
    y: i32,
    at_ms: u32,
}

/// Per-contact movement analyzer
///
/// The detector holds no clock; the driver supplies timestamps with each
/// sample.
#[derive(Debug, Clone)]
pub struct GestureDetector {
    window_ms: u32,
    history: FnvIndexMap<u8, Deque<Sample, MAX_SAMPLES>, MAX_TRACKED>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    /// Create a detector with the standard window
    pub fn new() -> Self {
        Self::with_window(GESTURE_WINDOW_MS)
    }

    /// Create a detector with a custom window length
    pub fn with_window(window_ms: u32) -> Self {
        Self {
            window_ms,
            history: FnvIndexMap::new(),
        }
    }

    /// Record a sample for a contact and classify its recent path
    pub fn update(&mut self, id: u8, x: u16, y: u16, now_ms: u32) -> Option<Gesture> {
        if !self.history.contains_key(&id) {
            // A full tracker drops the new contact's samples; the contact
            // still renders, just with the default color.
            if self.history.insert(id, Deque::new()).is_err() {
                return None;
            }
        }
        let path = self.history.get_mut(&id)?;

        if path.is_full() {
            path.pop_front();
        }
        let _ = path.push_back(Sample {
            x: i32::from(x),
            y: i32::from(y),
            at_ms: now_ms,
        });

        // Drop samples older than the window
        while let Some(front) = path.front() {
            if now_ms.saturating_sub(front.at_ms) > self.window_ms {
                path.pop_front();
            } else {
                break;
            }
        }

        Self::classify(path)
    }

    /// Forget a contact's history (called when the finger lifts)
    pub fn release(&mut self, id: u8) {
        self.history.remove(&id);
    }

    /// Number of contacts with recorded history
    pub fn tracked(&self) -> usize {
        self.history.len()
    }

    fn classify(path: &Deque<Sample, MAX_SAMPLES>) -> Option<Gesture> {
        if path.len() < MIN_SAMPLES {
            return None;
        }
        if Self::is_scrubbing(path) {
            Some(Gesture::Scrubbing)
        } else if Self::is_regression(path) {
            Some(Gesture::Regression)
        } else {
            None
        }
    }

    fn is_scrubbing(path: &Deque<Sample, MAX_SAMPLES>) -> bool {
        let x_min = path.iter().map(|s| s.x).min().unwrap_or(0);
        let x_max = path.iter().map(|s| s.x).max().unwrap_or(0);
        if x_max - x_min > SCRUB_MAX_X_RANGE {
            return false;
        }

        // Count sign changes of y about the window's median
        let mut ys: Vec<i32, MAX_SAMPLES> = path.iter().map(|s| s.y).collect();
        ys.sort_unstable();
        let y_mid = ys[ys.len() / 2];

        let mut crossings = 0;
        let mut previous_sign = None;
        for sample in path.iter() {
            let sign = sample.y > y_mid;
            if let Some(previous) = previous_sign {
                if sign != previous {
                    crossings += 1;
                }
            }
            previous_sign = Some(sign);
        }
        crossings >= SCRUB_MIN_CROSSINGS
    }

    fn is_regression(path: &Deque<Sample, MAX_SAMPLES>) -> bool {
        let y_min = path.iter().map(|s| s.y).min().unwrap_or(0);
        let y_max = path.iter().map(|s| s.y).max().unwrap_or(0);
        // The whole path must stay on one braille line
        if y_max - y_min > REGRESSION_MAX_Y_RANGE {
            return false;
        }

        let mut forward = false;
        let mut previous_x = None;
        for sample in path.iter() {
            if let Some(previous) = previous_x {
                let dx = sample.x - previous;
                if dx > REGRESSION_MIN_STEP {
                    forward = true;
                }
                if dx < -REGRESSION_MIN_STEP && forward {
                    return true;
                }
            }
            previous_x = Some(sample.x);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut GestureDetector, id: u8, path: &[(u16, u16)]) -> Option<Gesture> {
        let mut result = None;
        for (i, &(x, y)) in path.iter().enumerate() {
            result = detector.update(id, x, y, 100 * i as u32);
        }
        result
    }

    #[test]
    fn test_too_few_samples_is_no_gesture() {
        let mut detector = GestureDetector::new();
        let result = feed(&mut detector, 1, &[(100, 100), (100, 160), (100, 100), (100, 160)]);
        assert_eq!(result, None);
    }

    #[test]
    fn test_scrubbing_detected() {
        let mut detector = GestureDetector::new();
        // Fixed x, y oscillating about the line
        let path = [
            (100, 100),
            (102, 160),
            (100, 100),
            (98, 160),
            (100, 100),
            (101, 160),
            (100, 100),
        ];
        assert_eq!(feed(&mut detector, 1, &path), Some(Gesture::Scrubbing));
    }

    #[test]
    fn test_wide_horizontal_motion_is_not_scrubbing() {
        let mut detector = GestureDetector::new();
        // Same oscillation but drifting 30 units sideways
        let path = [
            (100, 100),
            (110, 160),
            (115, 100),
            (120, 160),
            (125, 100),
            (130, 160),
            (130, 100),
        ];
        assert_ne!(feed(&mut detector, 1, &path), Some(Gesture::Scrubbing));
    }

    #[test]
    fn test_regression_detected() {
        let mut detector = GestureDetector::new();
        // Forward along a line, then a jump back
        let path = [(100, 100), (110, 102), (120, 101), (130, 100), (122, 100)];
        assert_eq!(feed(&mut detector, 1, &path), Some(Gesture::Regression));
    }

    #[test]
    fn test_backward_before_forward_is_not_regression() {
        let mut detector = GestureDetector::new();
        let path = [(130, 100), (120, 100), (110, 100), (100, 100), (90, 100)];
        assert_eq!(feed(&mut detector, 1, &path), None);
    }

    #[test]
    fn test_line_change_is_not_regression() {
        let mut detector = GestureDetector::new();
        // Forward then back, but across 60 vertical units
        let path = [(100, 100), (110, 100), (120, 100), (130, 160), (122, 160)];
        assert_eq!(feed(&mut detector, 1, &path), None);
    }

    #[test]
    fn test_window_trims_stale_samples() {
        let mut detector = GestureDetector::with_window(300);
        let path = [(100, 100), (110, 102), (120, 101), (130, 100), (122, 100)];

        // Samples 400ms apart: only the newest survives each trim, so the
        // regression above never accumulates enough history
        let mut result = None;
        for (i, &(x, y)) in path.iter().enumerate() {
            result = detector.update(1, x, y, 400 * i as u32);
        }
        assert_eq!(result, None);
    }

    #[test]
    fn test_release_forgets_history() {
        let mut detector = GestureDetector::new();
        feed(&mut detector, 1, &[(100, 100), (110, 102), (120, 101), (130, 100)]);
        assert_eq!(detector.tracked(), 1);

        detector.release(1);
        assert_eq!(detector.tracked(), 0);

        // Fresh history after release: one more sample is not enough
        assert_eq!(detector.update(1, 122, 100, 2000), None);
    }

    #[test]
    fn test_contacts_are_tracked_independently() {
        let mut detector = GestureDetector::new();
        let scrub = [
            (100, 100),
            (102, 160),
            (100, 100),
            (98, 160),
            (100, 100),
            (101, 160),
            (100, 100),
        ];
        let idle = [(500, 200); 7];

        for i in 0..7 {
            detector.update(1, scrub[i].0, scrub[i].1, 100 * i as u32);
            detector.update(2, idle[i].0, idle[i].1, 100 * i as u32);
        }

        let one = detector.update(1, 100, 100, 800);
        let two = detector.update(2, 500, 200, 800);
        assert_eq!(one, Some(Gesture::Scrubbing));
        assert_eq!(two, None);
    }
}

pub const MIN_DIMENSION: u32 = 1;
pub const MAX_DIMENSION: u32 = 20000;
const MAX_DIGITS: usize = 5;

/// Clean up a dimension field on every keystroke: digits only, at most 5 of
/// them, clamped into [MIN_DIMENSION, MAX_DIMENSION]. The empty string is a
/// "still typing" state and is left alone.
pub fn sanitize(raw: &str) -> String {
    let digits = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect::<String>();

    if digits.is_empty() {
        return digits;
    }

    // 5 digits always fit an u32
    let value = digits.parse::<u32>().unwrap_or(MAX_DIMENSION);
    clamp_dimension(value).to_string()
}

pub fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// Which field to rewrite after a lock toggle.
#[derive(Debug, PartialEq, Eq)]
pub enum Adjustment {
    Width(u32),
    Height(u32),
}

/// The width/height coupling. The ratio is captured once from the original
/// dimensions and never recomputed from the inputs: locking always
/// reconstructs the original proportion, not whatever the fields show.
pub struct RatioLock {
    ratio: f64,
    locked: bool,
}

impl Default for RatioLock {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            locked: false,
        }
    }
}

impl RatioLock {
    pub fn from_original(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            ratio: width as f64 / height as f64,
            locked: false,
        })
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn height_for(&self, width: u32) -> u32 {
        clamp_dimension((width as f64 / self.ratio).round() as u32)
    }

    pub fn width_for(&self, height: u32) -> u32 {
        clamp_dimension((height as f64 * self.ratio).round() as u32)
    }

    /// Bring the two fields back in sync when the lock is switched on.
    /// Width drives when both are set.
    pub fn reconcile(&self, width: Option<u32>, height: Option<u32>) -> Option<Adjustment> {
        match (width, height) {
            (Some(width), _) => Some(Adjustment::Height(self.height_for(width))),
            (None, Some(height)) => Some(Adjustment::Width(self.width_for(height))),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_non_digits() {
        assert_eq!(sanitize("12a3"), "123");
        assert_eq!(sanitize("abc"), "");
        assert_eq!(sanitize("-42"), "42");
    }

    #[test]
    fn sanitize_truncates_to_five_digits() {
        assert_eq!(sanitize("123456"), "12345");
    }

    #[test]
    fn sanitize_clamps_into_range() {
        assert_eq!(sanitize("0"), "1");
        assert_eq!(sanitize("999999"), "20000");
    }

    #[test]
    fn sanitize_tolerates_the_empty_string() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn the_ratio_needs_two_nonzero_dimensions() {
        assert!(RatioLock::from_original(1920, 1080).is_some());
        assert!(RatioLock::from_original(0, 1080).is_none());
        assert!(RatioLock::from_original(1920, 0).is_none());
    }

    #[test]
    fn derivations_round_and_clamp() {
        let lock = RatioLock::from_original(1920, 1080).unwrap();
        assert_eq!(lock.height_for(1000), 563); // 562.5 rounds up
        assert_eq!(lock.width_for(1080), 1920);

        let tall = RatioLock::from_original(1, 2).unwrap();
        assert_eq!(tall.height_for(20000), 20000); // 40000 clamped
        assert_eq!(tall.width_for(1), 1); // 0.5 rounds to 1
    }

    #[test]
    fn lock_round_trip_stays_within_one_pixel() {
        for (original_width, original_height) in [(1920, 1080), (640, 480), (997, 313)] {
            let lock = RatioLock::from_original(original_width, original_height).unwrap();
            for width in [1, 50, 999, 1234, 20000] {
                let height = lock.height_for(width);
                let back = lock.width_for(height);
                assert!((MIN_DIMENSION..=MAX_DIMENSION).contains(&back));

                // where the clamp kicks in, the round trip can't be exact
                if height == MIN_DIMENSION
                    || height == MAX_DIMENSION
                    || back == MIN_DIMENSION
                    || back == MAX_DIMENSION
                {
                    continue;
                }

                assert!(
                    back.abs_diff(width) <= 1,
                    "{original_width}x{original_height}: {width} -> {height} -> {back}"
                );
            }
        }
    }

    #[test]
    fn reconcile_prefers_width() {
        let lock = RatioLock::from_original(1600, 900).unwrap();
        assert_eq!(
            lock.reconcile(Some(800), None),
            Some(Adjustment::Height(450))
        );
        assert_eq!(
            lock.reconcile(None, Some(450)),
            Some(Adjustment::Width(800))
        );
        assert_eq!(
            lock.reconcile(Some(800), Some(999)),
            Some(Adjustment::Height(450))
        );
        assert_eq!(lock.reconcile(None, None), None);
    }
}

//! Testimonial carousel walk.

use tracing::info;

use pashle_storefront::models::Carousel;

/// Show `start`, then move `steps` cards (backwards when negative).
pub fn walk(len: usize, start: i64, steps: i64) {
    let shown = positions(len, start, steps);
    if shown.is_empty() {
        info!("No testimonials to show");
        return;
    }
    for index in shown {
        info!("Showing {} of {len}", index + 1);
    }
}

/// Indices visited by the walk, starting card first.
///
/// Whole laps are skipped, so at most `len` moves follow the start.
fn positions(len: usize, start: i64, steps: i64) -> Vec<usize> {
    let mut carousel = Carousel::new(len);
    let Ok(len) = u64::try_from(len) else {
        return Vec::new();
    };
    if len == 0 {
        return Vec::new();
    }

    let mut shown = vec![carousel.show(start)];
    for _ in 0..steps.unsigned_abs() % len {
        shown.push(if steps < 0 { carousel.prev() } else { carousel.next() });
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_forward_and_back() {
        assert_eq!(positions(3, 0, 2), [0, 1, 2]);
        assert_eq!(positions(3, 1, -2), [1, 0, 2]);
        assert_eq!(positions(3, -1, 0), [2]);
    }

    #[test]
    fn test_positions_skip_whole_laps() {
        assert_eq!(positions(3, 0, 7), [0, 1]);
        assert_eq!(positions(3, 0, -6), [0]);
    }

    #[test]
    fn test_positions_extreme_steps_finish() {
        // i64::MIN has magnitude 2^63, which is 2 mod 3.
        assert_eq!(positions(3, 0, i64::MIN), [0, 2, 1]);
        // i64::MAX is 2^63 - 1, which is 1 mod 3.
        assert_eq!(positions(3, 0, i64::MAX), [0, 1]);
    }

    #[test]
    fn test_positions_empty() {
        assert!(positions(0, 5, 10).is_empty());
    }
}

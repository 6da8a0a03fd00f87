//! Testimonial carousel position.
//!
//! Only the index arithmetic lives here; advancing on a timer is the
//! caller's concern.

/// Which testimonial card is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    /// Create a carousel over `len` cards, showing the first one.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Number of cards.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no cards at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the active card.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Show the card at `index`, wrapping in both directions.
    ///
    /// Returns the normalized index. An empty carousel stays at 0.
    pub fn show(&mut self, index: i64) -> usize {
        let Ok(len) = i64::try_from(self.len) else {
            return self.current;
        };
        if len == 0 {
            return 0;
        }
        // rem_euclid keeps the result in 0..len, so the cast back cannot fail.
        self.current = usize::try_from(index.rem_euclid(len)).unwrap_or(0);
        self.current
    }

    /// Advance to the next card.
    pub fn next(&mut self) -> usize {
        let index = i64::try_from(self.current).unwrap_or(0).saturating_add(1);
        self.show(index)
    }

    /// Go back to the previous card.
    pub fn prev(&mut self) -> usize {
        let index = i64::try_from(self.current).unwrap_or(0).saturating_sub(1);
        self.show(index)
    }
}

//! Round-robin display color assignment.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::value_object::Color;

/// Fixed palette, handed out in order and repeated.
pub const PALETTE: [Color; 15] = [
    Color::from_static("#e74c3c"),
    Color::from_static("#3498db"),
    Color::from_static("#2ecc71"),
    Color::from_static("#f39c12"),
    Color::from_static("#9b59b6"),
    Color::from_static("#1abc9c"),
    Color::from_static("#e67e22"),
    Color::from_static("#e84393"),
    Color::from_static("#00cec9"),
    Color::from_static("#6c5ce7"),
    Color::from_static("#fd79a8"),
    Color::from_static("#00b894"),
    Color::from_static("#fdcb6e"),
    Color::from_static("#fab1a0"),
    Color::from_static("#74b9ff"),
];

/// Process-wide color counter. Colors are never released.
#[derive(Debug, Default)]
pub struct ColorAssigner {
    counter: AtomicUsize,
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `PALETTE[counter % 15]` and advance the counter.
    pub fn next(&self) -> Color {
        let index = self.counter.fetch_add(1, Ordering::Relaxed);
        PALETTE[index % PALETTE.len()]
    }
}

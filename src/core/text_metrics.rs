use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Font used for a text measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }

    /// Vertical advance of one wrapped line.
    #[must_use]
    pub fn line_height_px(&self) -> f64 {
        self.size_px * 1.2
    }
}

/// Host capability returning the rendered pixel width of a string.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f64;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontSpec) -> f64,
{
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        self(text, font)
    }
}

/// Deterministic, backend-independent width estimate.
///
/// Good enough for headless layout and tests; hosts with a real text stack
/// should supply their own measurer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' | ';' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'j' | 'l' | 'f' | 't' | 'r' | 'I' => 0.32,
                'A'..='Z' => 0.68,
                _ => 0.58,
            }
        });
        units * font.size_px
    }
}

type WidthKey = (String, String, OrderedFloat<f64>);

/// Memoizes an inner measurer for the lifetime of one layout pass.
///
/// Label wrapping re-measures growing prefixes of the same strings; the cache
/// is dropped with the pass, so nothing survives into the next update.
#[derive(Debug)]
pub struct CachedTextMeasurer<'a, M: TextMeasurer + ?Sized> {
    inner: &'a M,
    widths: RefCell<HashMap<WidthKey, f64>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<'a, M: TextMeasurer + ?Sized> CachedTextMeasurer<'a, M> {
    #[must_use]
    pub fn new(inner: &'a M) -> Self {
        Self {
            inner,
            widths: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// `(hits, misses)` observed so far.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.get(), self.misses.get())
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for CachedTextMeasurer<'_, M> {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let key = (
            font.family.clone(),
            text.to_owned(),
            OrderedFloat(font.size_px),
        );
        if let Some(width) = self.widths.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return *width;
        }

        let width = self.inner.measure(text, font);
        self.misses.set(self.misses.get() + 1);
        self.widths.borrow_mut().insert(key, width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::{CachedTextMeasurer, EstimatedTextMeasurer, FontSpec, TextMeasurer};

    #[test]
    fn estimate_scales_with_font_size() {
        let small = FontSpec::new("Arial", 10.0);
        let large = FontSpec::new("Arial", 20.0);
        let measurer = EstimatedTextMeasurer;

        let narrow = measurer.measure("Q1 2024", &small);
        let wide = measurer.measure("Q1 2024", &large);
        assert!((wide - 2.0 * narrow).abs() <= 1e-9);
        assert_eq!(measurer.measure("", &small), 0.0);
    }

    #[test]
    fn cache_reuses_widths_per_font() {
        let inner = EstimatedTextMeasurer;
        let cached = CachedTextMeasurer::new(&inner);
        let font = FontSpec::new("Arial", 12.0);

        let first = cached.measure("Revenue", &font);
        let second = cached.measure("Revenue", &font);
        let other_size = cached.measure("Revenue", &FontSpec::new("Arial", 14.0));

        assert_eq!(first, second);
        assert!(other_size > first);
        assert_eq!(cached.stats(), (1, 2));
    }
}

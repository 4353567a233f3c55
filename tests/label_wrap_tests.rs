use waterfall_rs::core::{
    CachedTextMeasurer, EstimatedTextMeasurer, FontSpec, TextMeasurer, WrappedLabel,
    max_label_lines, wrap_label,
};

fn half_em(text: &str, font: &FontSpec) -> f64 {
    text.chars().count() as f64 * font.size_px * 0.5
}

fn lines(label: &WrappedLabel) -> Vec<&str> {
    label.lines.iter().map(String::as_str).collect()
}

#[test]
fn long_label_breaks_on_word_boundaries() {
    let font = FontSpec::new("Arial", 10.0);
    let label = wrap_label("Cost of goods sold", 40.0, &font, &half_em);
    assert_eq!(lines(&label), vec!["Cost of", "goods", "sold"]);
}

#[test]
fn label_that_fits_stays_on_one_line() {
    let font = FontSpec::new("Arial", 10.0);
    let label = wrap_label("Q1 2024", 100.0, &font, &half_em);
    assert_eq!(lines(&label), vec!["Q1 2024"]);
    assert_eq!(label.line_count(), 1);
}

#[test]
fn oversized_word_is_kept_whole() {
    let font = FontSpec::new("Arial", 10.0);
    let label = wrap_label("Depreciation and amortization", 30.0, &font, &half_em);
    assert_eq!(
        lines(&label),
        vec!["Depreciation", "and", "amortization"]
    );
}

#[test]
fn blank_label_keeps_one_empty_line() {
    let font = FontSpec::new("Arial", 10.0);
    assert_eq!(lines(&wrap_label("", 40.0, &font, &half_em)), vec![""]);
    assert_eq!(lines(&wrap_label("   ", 40.0, &font, &half_em)), vec![""]);
}

#[test]
fn repeated_whitespace_collapses() {
    let font = FontSpec::new("Arial", 10.0);
    let label = wrap_label("  Net   income ", 200.0, &font, &half_em);
    assert_eq!(lines(&label), vec!["Net income"]);
}

#[test]
fn tallest_label_sets_the_line_count() {
    let font = FontSpec::new("Arial", 10.0);
    let labels: Vec<WrappedLabel> = ["Revenue", "Cost of goods sold", "Tax"]
        .iter()
        .map(|text| wrap_label(text, 40.0, &font, &half_em))
        .collect();
    assert_eq!(max_label_lines(&labels), 3);
    assert_eq!(max_label_lines(&[]), 1);
}

#[test]
fn estimated_widths_wrap_narrow_columns() {
    let font = FontSpec::new("Arial", 10.0);
    let measurer = EstimatedTextMeasurer;
    let label = wrap_label("Cost of goods sold", 45.0, &font, &measurer);

    assert!(label.line_count() >= 2);
    for line in &label.lines {
        if line.contains(' ') {
            assert!(measurer.measure(line, &font) <= 45.0);
        }
    }
}

#[test]
fn cached_measurer_matches_its_inner_measurer() {
    let font = FontSpec::new("Arial", 10.0);
    let inner = EstimatedTextMeasurer;
    let cached = CachedTextMeasurer::new(&inner);

    let direct = wrap_label("Selling general and administrative", 60.0, &font, &inner);
    let memoized = wrap_label("Selling general and administrative", 60.0, &font, &cached);
    assert_eq!(direct, memoized);

    let _ = wrap_label("Selling general and administrative", 60.0, &font, &cached);
    let (hits, misses) = cached.stats();
    assert!(hits > 0);
    assert!(misses > 0);
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BarPalette, DataPoint, PointKind};

/// One raw cell of a value column as handed over by the host.
///
/// Deserializes untagged: JSON numbers become `Number`, strings `Text` and
/// `null` `Missing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Returns the numeric value when it is usable for layout.
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Already-extracted categorical data binding.
///
/// Every column is aligned with `categories`; column order is group order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoricalView {
    pub categories: Vec<String>,
    pub columns: IndexMap<String, Vec<CellValue>>,
    #[serde(default)]
    pub format_string: Option<String>,
}

impl CategoricalView {
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            columns: IndexMap::new(),
            format_string: None,
        }
    }

    /// Appends (or replaces) a named value column.
    #[must_use]
    pub fn with_column<I, V>(mut self, group_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.columns.insert(
            group_name.into(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_format_string(mut self, format_string: impl Into<String>) -> Self {
        self.format_string = Some(format_string.into());
        self
    }
}

/// Switches applied while turning raw columns into waterfall points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Drops the first increment of the first group from the emitted items
    /// while still counting it toward totals and extrema.
    #[serde(default)]
    pub hide_first_increment: bool,
    #[serde(default)]
    pub include_grand_total: bool,
    #[serde(default = "default_grand_total_label")]
    pub grand_total_label: String,
}

fn default_grand_total_label() -> String {
    "Total".to_owned()
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            hide_first_increment: false,
            include_grand_total: false,
            grand_total_label: default_grand_total_label(),
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn with_hide_first_increment(mut self, hide: bool) -> Self {
        self.hide_first_increment = hide;
        self
    }

    #[must_use]
    pub fn with_grand_total(mut self, label: impl Into<String>) -> Self {
        self.include_grand_total = true;
        self.grand_total_label = label.into();
        self
    }
}

/// Ordered waterfall items plus the running statistics gathered while
/// building them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub items: Vec<DataPoint>,
    /// Lowest of zero, every raw value and every running total.
    pub min_value: f64,
    /// Highest of zero, every raw value and every running total.
    pub max_value: f64,
    /// Sum of every increment, hidden ones included.
    pub total: f64,
    /// Sum of the increments removed by `hide_first_increment`.
    pub opening_total: f64,
    pub format_string: String,
}

impl ChartDataset {
    /// The steady "no data yet" state.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            min_value: 0.0,
            max_value: 0.0,
            total: 0.0,
            opening_total: 0.0,
            format_string: String::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.category.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
struct Extrema {
    min: f64,
    max: f64,
}

impl Extrema {
    fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Builds a fresh dataset from the host binding.
///
/// A missing binding yields [`ChartDataset::empty`]; unusable cells are
/// skipped one by one. Nothing here fails.
#[must_use]
pub fn transform(
    view: Option<&CategoricalView>,
    options: &TransformOptions,
    palette: &BarPalette,
) -> ChartDataset {
    let Some(view) = view else {
        debug!("no categorical binding, using empty dataset");
        return ChartDataset::empty();
    };

    let mut staged: Vec<(String, f64, PointKind)> = Vec::new();
    let mut extrema = Extrema { min: 0.0, max: 0.0 };
    let mut total = 0.0;
    let mut opening_total = 0.0;
    let mut skipped_cells = 0_usize;

    for (group_index, (group_name, values)) in view.columns.iter().enumerate() {
        let mut pending_hide = options.hide_first_increment && group_index == 0;

        for (category_index, category) in view.categories.iter().enumerate() {
            let Some(value) = values.get(category_index).and_then(CellValue::as_finite) else {
                skipped_cells += 1;
                continue;
            };

            total += value;
            extrema.observe(value);
            extrema.observe(total);

            if pending_hide {
                pending_hide = false;
                opening_total += value;
                trace!(category = %category, value, "hiding first increment");
                continue;
            }
            staged.push((category.clone(), value, PointKind::Increment));
        }

        // A subtotal shows the running total at the end of its group.
        staged.push((group_name.clone(), total, PointKind::Subtotal));
    }

    if options.include_grand_total && !view.columns.is_empty() {
        staged.push((
            options.grand_total_label.clone(),
            total,
            PointKind::GrandTotal,
        ));
    }

    let max_increment_magnitude = staged
        .iter()
        .filter(|(_, _, kind)| *kind == PointKind::Increment)
        .fold(0.0_f64, |acc, (_, value, _)| acc.max(value.abs()));

    let items: Vec<DataPoint> = staged
        .into_iter()
        .map(|(category, value, kind)| {
            let color = palette.resolve(kind, value, max_increment_magnitude);
            DataPoint::new(category, value, kind, color)
        })
        .collect();

    debug!(
        groups = view.columns.len(),
        categories = view.categories.len(),
        items = items.len(),
        skipped_cells,
        min_value = extrema.min,
        max_value = extrema.max,
        total,
        "transformed categorical input"
    );

    ChartDataset {
        items,
        min_value: extrema.min,
        max_value: extrema.max,
        total,
        opening_total,
        format_string: view.format_string.clone().unwrap_or_default(),
    }
}

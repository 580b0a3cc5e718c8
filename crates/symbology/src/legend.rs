use classify::{AttributeSample, ClassValue, Scale};

use crate::technique::TechniqueType;

/// One legend row: the visual output it stands for and a human-readable
/// label. Entries are ordered highest range value first.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub range_value: ClassValue,
    pub label: String,
    pub sort_index: usize,
}

/// Suggested canvas size for the external SVG renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutHint {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub layout: LayoutHint,
}

// Row metrics mirror the viewer's SVG legend.
const ROW_HEIGHT: f64 = 13.0;
const ROW_PADDING: f64 = 6.0;
const SWATCH_GUTTER: f64 = 40.0;
const SYMBOL_MARGIN: f64 = 10.0;
// Estimated label glyph width; the original measured rendered text, which a
// pure function cannot.
const LABEL_CHAR_WIDTH: f64 = 7.0;
const LABEL_PADDING: f64 = 5.0;

/// Inverts a computed scale into display entries. Classed scales get one
/// interval-labeled entry per class; unclassed scales get two entries
/// labeled with the raw domain extremes.
pub fn build(scale: &Scale, sample: &AttributeSample, technique_type: TechniqueType) -> Legend {
    let (dmin, dmax) = scale.domain();
    let dmin = sample.min().unwrap_or(dmin);
    let dmax = sample.max().unwrap_or(dmax);

    let entries = match scale {
        Scale::Classed(classed) => {
            let last = classed.len() - 1;
            (0..classed.len())
                .rev()
                .enumerate()
                .map(|(sort_index, class)| {
                    let (lower, upper) = classed.invert(class);
                    // The last class is capped by the sample maximum; every
                    // other class reports the largest data value it holds,
                    // not the exclusive break above it.
                    let upper = if class == last {
                        dmax
                    } else {
                        largest_below(sample, lower, upper)
                    };
                    LegendEntry {
                        range_value: classed.outputs()[class].clone(),
                        label: format!("{lower} - {upper}"),
                        sort_index,
                    }
                })
                .collect()
        }
        Scale::Linear(linear) => vec![
            LegendEntry {
                range_value: linear.map(dmax),
                label: format!("{dmax}"),
                sort_index: 0,
            },
            LegendEntry {
                range_value: linear.map(dmin),
                label: format!("{dmin}"),
                sort_index: 1,
            },
        ],
    };

    Legend {
        layout: layout_for(&entries, technique_type),
        entries,
    }
}

/// Largest sample value inside `[lower, upper)`, or `lower` for a class
/// holding no data.
fn largest_below(sample: &AttributeSample, lower: f64, upper: f64) -> f64 {
    let values = sample.values();
    let idx = values.partition_point(|v| *v < upper);
    match idx.checked_sub(1).map(|i| values[i]) {
        Some(v) if v >= lower => v,
        _ => lower,
    }
}

fn layout_for(entries: &[LegendEntry], technique_type: TechniqueType) -> LayoutHint {
    let rows_height = ROW_HEIGHT * entries.len() as f64 + ROW_PADDING;
    let max_radius = entries
        .iter()
        .filter_map(|e| e.range_value.as_number())
        .fold(0.0f64, f64::max);

    let (height, symbol_width) = match technique_type {
        TechniqueType::ProportionalSymbol => (
            rows_height.max(2.0 * max_radius + ROW_PADDING),
            2.0 * (max_radius + SYMBOL_MARGIN),
        ),
        TechniqueType::Choropleth => (rows_height, SWATCH_GUTTER),
    };

    let width = entries
        .iter()
        .map(|e| e.label.chars().count() as f64 * LABEL_CHAR_WIDTH + LABEL_PADDING + symbol_width)
        .fold(0.0f64, f64::max);

    LayoutHint { width, height }
}

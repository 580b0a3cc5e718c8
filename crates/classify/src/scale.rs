use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::ClassificationError;

/// A technique class output: a color string for choropleth ramps or a
/// numeric radius for proportional symbols. Configuration may supply radii
/// as strings; `as_number` coerces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassValue {
    Number(f64),
    Color(String),
}

impl ClassValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ClassValue::Number(n) if n.is_finite() => Some(*n),
            ClassValue::Color(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClassValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassValue::Number(n) => write!(f, "{n}"),
            ClassValue::Color(s) => write!(f, "{s}"),
        }
    }
}

/// Step-function scale: interior breaks partition the domain into one
/// bucket per output. Breaks are computed once from the sample; a value
/// equal to a break belongs to the bucket above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassedScale {
    breaks: Vec<f64>,
    outputs: Vec<ClassValue>,
    domain: (f64, f64),
}

impl ClassedScale {
    /// Invariant: `breaks` ascending with `breaks.len() + 1 == outputs.len()`.
    pub(crate) fn new(breaks: Vec<f64>, outputs: Vec<ClassValue>, domain: (f64, f64)) -> Self {
        debug_assert_eq!(breaks.len() + 1, outputs.len());
        debug_assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
        Self {
            breaks,
            outputs,
            domain,
        }
    }

    pub fn class_index(&self, value: f64) -> usize {
        self.breaks.partition_point(|b| *b <= value)
    }

    pub fn map(&self, value: f64) -> &ClassValue {
        &self.outputs[self.class_index(value)]
    }

    /// Domain interval represented by a class. The first class is bounded
    /// below by the sample minimum and the last above by the sample maximum,
    /// since those bounds carry no explicit break.
    pub fn invert(&self, class: usize) -> (f64, f64) {
        let lower = if class == 0 {
            self.domain.0
        } else {
            self.breaks[class - 1]
        };
        let upper = if class == self.breaks.len() {
            self.domain.1
        } else {
            self.breaks[class]
        };
        (lower, upper)
    }

    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    pub fn outputs(&self) -> &[ClassValue] {
        &self.outputs
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum LinearRange {
    Number(f64, f64),
    Color {
        low: (String, [u8; 3]),
        high: (String, [u8; 3]),
    },
}

/// Continuous two-stop scale over `[min, max]`, clamped to the domain
/// extremes. Numeric endpoints interpolate linearly; color endpoints
/// interpolate channel-wise in RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: LinearRange,
}

impl LinearScale {
    pub fn new(
        domain: (f64, f64),
        low: &ClassValue,
        high: &ClassValue,
    ) -> Result<Self, ClassificationError> {
        let range = match (low.as_number(), high.as_number()) {
            (Some(a), Some(b)) => LinearRange::Number(a, b),
            (None, None) => {
                let (ClassValue::Color(a), ClassValue::Color(b)) = (low, high) else {
                    return Err(ClassificationError::MixedClassKinds);
                };
                let low_rgb = color::parse_hex(a)
                    .ok_or_else(|| ClassificationError::InvalidColor(a.clone()))?;
                let high_rgb = color::parse_hex(b)
                    .ok_or_else(|| ClassificationError::InvalidColor(b.clone()))?;
                LinearRange::Color {
                    low: (a.clone(), low_rgb),
                    high: (b.clone(), high_rgb),
                }
            }
            _ => return Err(ClassificationError::MixedClassKinds),
        };
        Ok(Self { domain, range })
    }

    pub fn map(&self, value: f64) -> ClassValue {
        let (d0, d1) = self.domain;
        // Degenerate domain collapses to the low endpoint.
        if value <= d0 || d1 <= d0 {
            return self.low();
        }
        if value >= d1 {
            return self.high();
        }
        let t = (value - d0) / (d1 - d0);
        match &self.range {
            LinearRange::Number(a, b) => ClassValue::Number(a + t * (b - a)),
            LinearRange::Color { low, high } => {
                ClassValue::Color(color::format_hex(color::lerp(low.1, high.1, t)))
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.range, LinearRange::Number(..))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn low(&self) -> ClassValue {
        match &self.range {
            LinearRange::Number(a, _) => ClassValue::Number(*a),
            LinearRange::Color { low, .. } => ClassValue::Color(low.0.clone()),
        }
    }

    fn high(&self) -> ClassValue {
        match &self.range {
            LinearRange::Number(_, b) => ClassValue::Number(*b),
            LinearRange::Color { high, .. } => ClassValue::Color(high.0.clone()),
        }
    }
}

/// Computed mapping from attribute value to visual output. Built once per
/// (layer, technique) pair and shared by the encoder and the legend builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Classed(ClassedScale),
    Linear(LinearScale),
}

impl Scale {
    pub fn map(&self, value: f64) -> ClassValue {
        match self {
            Scale::Classed(s) => s.map(value).clone(),
            Scale::Linear(s) => s.map(value),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            Scale::Classed(s) => s.domain(),
            Scale::Linear(s) => s.domain(),
        }
    }
}

use geodata::{FeatureCollection, PropertyValue};

/// Ascending-sorted finite attribute values pulled from a feature collection.
///
/// Non-numeric entries are dropped at extraction time; their features are
/// later skipped by the encoder rather than styled. An empty sample is legal
/// here and rejected by `build_scale`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeSample {
    values: Vec<f64>,
}

impl AttributeSample {
    pub fn extract(features: &FeatureCollection, attribute: &str) -> Self {
        Self::from_values(
            features
                .features
                .iter()
                .filter_map(|f| f.property(attribute))
                .filter_map(PropertyValue::as_number)
                .collect(),
        )
    }

    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.retain(|v| v.is_finite());
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

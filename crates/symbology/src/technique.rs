use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use classify::{
    AttributeSample, ClassValue, Classification, ClassificationError, Scale, user_defined_scale,
};
use geodata::{AnchorSource, FeatureCollection, FeatureId, LngLat, PropertyValue};

use crate::style::Style;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechniqueType {
    #[serde(rename = "choropleth")]
    Choropleth,
    #[serde(rename = "proportional symbol", alias = "proportional-symbol")]
    ProportionalSymbol,
}

/// Declarative technique configuration for one thematic rendering of a
/// layer. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    #[serde(rename = "type")]
    pub technique_type: TechniqueType,
    pub classification: Classification,
    pub classes: Vec<ClassValue>,
    /// Explicit breakpoints, used by the user-defined classification only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<f64>,
    /// Symbol icon for proportional symbol layers; circle when absent.
    /// Passed through to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Technique {
    pub fn build_scale(&self, sample: &AttributeSample) -> Result<Scale, ClassificationError> {
        match self.classification {
            Classification::UserDefined => user_defined_scale(sample, &self.breaks, &self.classes),
            c => c.build_scale(sample, &self.classes),
        }
    }
}

/// Computed visual encoding for one feature under one technique.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub style: Style,
    /// Symbol placement for proportional symbol layers.
    pub anchor: Option<LngLat>,
}

/// Applies a computed scale to every feature with a numeric value for the
/// expressed attribute. Features without one get no entry (the renderer
/// falls back to layer defaults). Pure function of its inputs, so a second
/// call with the same scale and attribute yields an identical map.
pub fn apply_to_features(
    features: &FeatureCollection,
    scale: &Scale,
    attribute: &str,
    technique_type: TechniqueType,
    anchors: &dyn AnchorSource,
) -> Result<BTreeMap<FeatureId, StyledFeature>, ClassificationError> {
    if technique_type == TechniqueType::ProportionalSymbol {
        require_numeric_outputs(scale)?;
    }

    let mut out = BTreeMap::new();
    for (id, feature) in features.iter() {
        let Some(value) = feature
            .property(attribute)
            .and_then(PropertyValue::as_number)
        else {
            continue;
        };
        let styled = match technique_type {
            TechniqueType::Choropleth => StyledFeature {
                style: Style {
                    fill_color: Some(scale.map(value).to_string()),
                    ..Style::default()
                },
                anchor: None,
            },
            TechniqueType::ProportionalSymbol => {
                let Some(radius) = scale.map(value).as_number() else {
                    continue;
                };
                StyledFeature {
                    style: Style {
                        radius: Some(radius),
                        ..Style::default()
                    },
                    anchor: anchors.representative_point(&feature.geometry),
                }
            }
        };
        out.insert(id, styled);
    }
    Ok(out)
}

/// Proportional symbols need numeric radii; configuration may legally
/// supply them as strings, but color ramps are a misconfiguration.
fn require_numeric_outputs(scale: &Scale) -> Result<(), ClassificationError> {
    match scale {
        Scale::Classed(s) => {
            for output in s.outputs() {
                if output.as_number().is_none() {
                    return Err(ClassificationError::NonNumericClass(output.to_string()));
                }
            }
            Ok(())
        }
        Scale::Linear(s) => {
            if s.is_numeric() {
                Ok(())
            } else {
                Err(ClassificationError::NonNumericClass(
                    "color ramp".to_string(),
                ))
            }
        }
    }
}

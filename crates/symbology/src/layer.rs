use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use classify::{AttributeSample, ClassificationError, Scale};
use geodata::{AnchorSource, FeatureCollection, FeatureId};

use crate::legend::{self, Legend};
use crate::style::Style;
use crate::technique::{StyledFeature, Technique, apply_to_features};

/// One data layer of the study configuration document. The core never
/// fetches `source`; the caller resolves it to a feature collection first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLayerConfig {
    pub name: String,
    pub source: String,
    pub expressed_attribute: String,
    /// Attributes shown on retrieve; the expressed attribute when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_attributes: Vec<String>,
    pub techniques: Vec<Technique>,
    /// Layer-wide default style; computed per-feature values override it.
    #[serde(default)]
    pub layer_options: Style,
    #[serde(default = "default_render_on_load")]
    pub render_on_load: bool,
}

fn default_render_on_load() -> bool {
    true
}

/// Everything the rendering collaborators need for one technique of one
/// layer: the computed scale, per-feature encodings, and the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRendering {
    pub scale: Scale,
    pub styles: BTreeMap<FeatureId, StyledFeature>,
    pub legend: Legend,
}

impl LayerRendering {
    /// Final style for one feature: computed values over layer defaults.
    /// Unstyled features render with the defaults alone.
    pub fn resolved_style(&self, id: FeatureId, defaults: &Style) -> Style {
        match self.styles.get(&id) {
            Some(styled) => styled.style.resolve(defaults),
            None => defaults.clone(),
        }
    }
}

/// One full classification pass for a single technique. Also the
/// "reexpress" entry point: switching attribute or technique is a fresh
/// call with the new arguments. Synchronous and pure; callers serialize
/// reclassification per layer.
pub fn reclassify(
    features: &FeatureCollection,
    technique: &Technique,
    attribute: &str,
    anchors: &dyn AnchorSource,
) -> Result<LayerRendering, ClassificationError> {
    let sample = AttributeSample::extract(features, attribute);
    let scale = technique.build_scale(&sample)?;
    let styles = apply_to_features(
        features,
        &scale,
        attribute,
        technique.technique_type,
        anchors,
    )?;
    let legend = legend::build(&scale, &sample, technique.technique_type);
    Ok(LayerRendering {
        scale,
        styles,
        legend,
    })
}

/// Classifies every technique of a layer against its expressed attribute.
/// A technique that cannot be classified yields its error in place; the
/// remaining techniques still render.
pub fn render_layer(
    config: &DataLayerConfig,
    features: &FeatureCollection,
    anchors: &dyn AnchorSource,
) -> Vec<Result<LayerRendering, ClassificationError>> {
    config
        .techniques
        .iter()
        .map(|t| reclassify(features, t, &config.expressed_attribute, anchors))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use classify::{ClassValue, Classification};
    use geodata::BoundsCenter;
    use pretty_assertions::assert_eq;

    use crate::technique::TechniqueType;

    const CONFIG: &str = r##"{
        "name": "County Density",
        "source": "data/counties.geojson",
        "expressedAttribute": "density",
        "displayAttributes": ["name", "density"],
        "techniques": [
            {
                "type": "choropleth",
                "classification": "quantile",
                "classes": ["#fee5d9", "#fb6a4a", "#a50f15"]
            },
            {
                "type": "proportional symbol",
                "classification": "unclassed",
                "classes": [5, 20]
            }
        ],
        "layerOptions": {"color": "#444", "weight": 0.5, "fillOpacity": 0.8},
        "renderOnLoad": true
    }"##;

    fn features() -> FeatureCollection {
        FeatureCollection::from_json(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature",
                     "geometry": {"type": "Point", "coordinates": [0, 0]},
                     "properties": {"name": "a", "density": 10}},
                    {"type": "Feature",
                     "geometry": {"type": "Point", "coordinates": [1, 0]},
                     "properties": {"name": "b", "density": 20}},
                    {"type": "Feature",
                     "geometry": {"type": "Point", "coordinates": [2, 0]},
                     "properties": {"name": "c", "density": 30}},
                    {"type": "Feature",
                     "geometry": {"type": "Point", "coordinates": [3, 0]},
                     "properties": {"name": "d"}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn config_document_round_trips() {
        let config: DataLayerConfig = serde_json::from_str(CONFIG).unwrap();
        assert_eq!(config.name, "County Density");
        assert_eq!(config.expressed_attribute, "density");
        assert_eq!(config.techniques.len(), 2);
        assert!(config.render_on_load);
        assert_eq!(config.layer_options.weight, Some(0.5));

        let json = serde_json::to_string(&config).unwrap();
        let back: DataLayerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn render_layer_produces_one_rendering_per_technique() {
        let config: DataLayerConfig = serde_json::from_str(CONFIG).unwrap();
        let fc = features();
        let rendered = render_layer(&config, &fc, &BoundsCenter);
        assert_eq!(rendered.len(), 2);

        let choropleth = rendered[0].as_ref().unwrap();
        assert_eq!(choropleth.styles.len(), 3);
        assert_eq!(choropleth.legend.entries.len(), 3);

        let symbols = rendered[1].as_ref().unwrap();
        assert_eq!(symbols.styles[&FeatureId(1)].style.radius, Some(12.5));
        assert_eq!(symbols.legend.entries.len(), 2);
    }

    #[test]
    fn failing_technique_does_not_stop_the_others() {
        let mut config: DataLayerConfig = serde_json::from_str(CONFIG).unwrap();
        // Break the second technique: unclassed needs exactly two endpoints.
        config.techniques[1].classes.push(ClassValue::Number(40.0));
        let rendered = render_layer(&config, &features(), &BoundsCenter);
        assert!(rendered[0].is_ok());
        assert!(matches!(
            rendered[1],
            Err(ClassificationError::ClassArity { .. })
        ));
    }

    #[test]
    fn resolved_style_layers_computed_over_defaults() {
        let config: DataLayerConfig = serde_json::from_str(CONFIG).unwrap();
        let fc = features();
        let rendering = reclassify(
            &fc,
            &config.techniques[0],
            &config.expressed_attribute,
            &BoundsCenter,
        )
        .unwrap();

        let styled = rendering.resolved_style(FeatureId(0), &config.layer_options);
        assert_eq!(styled.fill_color.as_deref(), Some("#fee5d9"));
        assert_eq!(styled.weight, Some(0.5));
        assert_eq!(styled.fill_opacity, Some(0.8));

        // Feature without a numeric value falls back to defaults alone.
        let fallback = rendering.resolved_style(FeatureId(3), &config.layer_options);
        assert_eq!(fallback, config.layer_options);
    }

    #[test]
    fn reexpressing_another_attribute_recomputes_styles() {
        let technique = Technique {
            technique_type: TechniqueType::Choropleth,
            classification: Classification::EqualInterval,
            classes: vec![
                ClassValue::Color("#eee".to_string()),
                ClassValue::Color("#333".to_string()),
            ],
            breaks: Vec::new(),
            symbol: None,
        };
        let fc = FeatureCollection::from_json(
            r#"{
                "features": [
                    {"geometry": {"type": "Point", "coordinates": [0, 0]},
                     "properties": {"pop": 100, "area": 2}},
                    {"geometry": {"type": "Point", "coordinates": [1, 0]},
                     "properties": {"pop": 900, "area": 50}}
                ]
            }"#,
        )
        .unwrap();

        let by_pop = reclassify(&fc, &technique, "pop", &BoundsCenter).unwrap();
        let by_area = reclassify(&fc, &technique, "area", &BoundsCenter).unwrap();
        assert_eq!(by_pop.styles.len(), 2);
        assert_eq!(by_area.styles.len(), 2);
        assert_ne!(by_pop.scale, by_area.scale);
        // Same call again is stable.
        let again = reclassify(&fc, &technique, "pop", &BoundsCenter).unwrap();
        assert_eq!(again.styles, by_pop.styles);
        assert_eq!(again.legend, by_pop.legend);
    }
}

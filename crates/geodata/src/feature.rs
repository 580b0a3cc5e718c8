use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;

/// Stable handle for a feature within its collection (insertion index).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub u64);

/// Raw attribute value as found in a GeoJSON properties table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl PropertyValue {
    /// Numeric reading of the value: numbers pass through, strings are
    /// parsed after trimming. Booleans, nulls, and non-finite numbers
    /// yield None.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) if n.is_finite() => Some(*n),
            PropertyValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Feature {
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features paired with their stable ids.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, f)| (FeatureId(i as u64), f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_value_numeric_readings() {
        assert_eq!(PropertyValue::Number(3.5).as_number(), Some(3.5));
        assert_eq!(
            PropertyValue::Text(" 42 ".to_string()).as_number(),
            Some(42.0)
        );
        assert_eq!(PropertyValue::Text("n/a".to_string()).as_number(), None);
        assert_eq!(PropertyValue::Bool(true).as_number(), None);
        assert_eq!(PropertyValue::Null.as_number(), None);
    }

    #[test]
    fn collection_parses_geojson_document() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [-89.4, 43.07]},
                    "properties": {"name": "Dane", "pop": 488073, "density": "563.1"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]},
                    "properties": {"name": "Iowa", "pop": null}
                }
            ]
        }"#;
        let fc = FeatureCollection::from_json(raw).unwrap();
        assert_eq!(fc.len(), 2);
        let (id, first) = fc.iter().next().unwrap();
        assert_eq!(id, FeatureId(0));
        assert_eq!(
            first.property("density").and_then(PropertyValue::as_number),
            Some(563.1)
        );
        assert_eq!(fc.features[1].property("pop"), Some(&PropertyValue::Null));
    }
}

use serde::{Deserialize, Serialize};

/// Leaflet-compatible vector style options. Field names serialize to the
/// option keys the rendering collaborator consumes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linejoin: Option<String>,
}

impl Style {
    /// Merges layer defaults under this style, key by key: computed values
    /// win, unset keys fall back. Neither input is modified.
    pub fn resolve(&self, defaults: &Style) -> Style {
        Style {
            fill_color: self.fill_color.clone().or_else(|| defaults.fill_color.clone()),
            radius: self.radius.or(defaults.radius),
            fill_opacity: self.fill_opacity.or(defaults.fill_opacity),
            color: self.color.clone().or_else(|| defaults.color.clone()),
            weight: self.weight.or(defaults.weight),
            opacity: self.opacity.or(defaults.opacity),
            dash_array: self.dash_array.clone().or_else(|| defaults.dash_array.clone()),
            linecap: self.linecap.clone().or_else(|| defaults.linecap.clone()),
            linejoin: self.linejoin.clone().or_else(|| defaults.linejoin.clone()),
        }
    }
}

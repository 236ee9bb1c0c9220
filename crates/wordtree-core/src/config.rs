use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped configuration overrides (config file, then command-line flags).
///
/// Values are addressed by dotted paths (`"zoom.scale"`) and resolved into a typed
/// [`LayoutConfig`] with [`LayoutConfig::from_site_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig(Value);

impl Default for SiteConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl SiteConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // A config built with `from_value` may hold any JSON value; coerce to an object so this
        // never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Which text a node label shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// The last segment of the node id.
    #[default]
    Words,
    /// The record's `shortsteal` (the root still shows its word).
    Steals,
}

impl std::str::FromStr for LabelMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "words" | "word" => Ok(Self::Words),
            "steals" | "steal" => Ok(Self::Steals),
            _ => Err(()),
        }
    }
}

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Initial pan/zoom applied to the root group of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate: [f64; 2],
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: [0.0, 0.0],
        }
    }
}

impl ZoomTransform {
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate == [0.0, 0.0]
    }

    /// Returns a copy with the scale clamped to the supported zoom extent.
    pub fn clamped(self) -> Self {
        let scale = if self.scale.is_finite() {
            self.scale.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
        Self { scale, ..self }
    }
}

/// Immutable layout parameters, passed into every layout/render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Radial distance between two depth levels.
    pub radius: f64,
    /// Angular budget in degrees shared by all nodes.
    pub angle: f64,
    /// Label font size in px; also the tooltip line height.
    pub font_size: f64,
    pub label_mode: LabelMode,
    /// Scale link stroke widths by record probability.
    pub playability: bool,
    /// Maximum tooltip line width in px.
    pub tooltip_width: f64,
    /// Output width in px; height follows the content aspect ratio.
    pub image_size: Option<f64>,
    pub zoom: ZoomTransform,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 240.0,
            angle: 360.0,
            font_size: 12.0,
            label_mode: LabelMode::Words,
            playability: false,
            tooltip_width: 300.0,
            image_size: None,
            zoom: ZoomTransform::default(),
        }
    }
}

impl LayoutConfig {
    /// Resolves the defaults overlaid with `site` and validates the result.
    pub fn from_site_config(site: &SiteConfig) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut merged, site.as_value());
        let cfg: Self = serde_json::from_value(merged).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f64) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    message: format!("{name} must be a positive number (got {v})"),
                })
            }
        }

        positive("radius", self.radius)?;
        positive("angle", self.angle)?;
        if self.angle > 360.0 {
            return Err(Error::InvalidConfig {
                message: format!("angle must not exceed 360 (got {})", self.angle),
            });
        }
        positive("fontSize", self.font_size)?;
        positive("tooltipWidth", self.tooltip_width)?;
        if let Some(size) = self.image_size {
            positive("imageSize", size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_slider_positions() {
        let cfg = LayoutConfig::from_site_config(&SiteConfig::default()).unwrap();
        assert_eq!(cfg, LayoutConfig::default());
        assert_eq!(cfg.radius, 240.0);
        assert_eq!(cfg.angle, 360.0);
        assert_eq!(cfg.font_size, 12.0);
    }

    #[test]
    fn dotted_overrides_are_merged() {
        let mut site = SiteConfig::from_value(json!({"radius": 100, "zoom": {"scale": 2}}));
        site.set_value("zoom.translate", json!([5, 6]));
        site.set_value("labelMode", json!("steals"));
        let cfg = LayoutConfig::from_site_config(&site).unwrap();
        assert_eq!(cfg.radius, 100.0);
        assert_eq!(cfg.label_mode, LabelMode::Steals);
        assert_eq!(cfg.zoom.scale, 2.0);
        assert_eq!(cfg.zoom.translate, [5.0, 6.0]);
        assert_eq!(site.get_f64("zoom.scale"), Some(2.0));
        assert_eq!(site.get_str("labelMode"), Some("steals"));
    }

    #[test]
    fn set_value_coerces_non_object_roots() {
        let mut site = SiteConfig::from_value(json!(42));
        site.set_value("angle", json!(180));
        assert_eq!(site.get_f64("angle"), Some(180.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let site = SiteConfig::from_value(json!({"angle": 720}));
        assert!(matches!(
            LayoutConfig::from_site_config(&site),
            Err(Error::InvalidConfig { .. })
        ));
        let site = SiteConfig::from_value(json!({"radius": -1}));
        assert!(LayoutConfig::from_site_config(&site).is_err());
        let site = SiteConfig::from_value(json!({"labelMode": "letters"}));
        assert!(LayoutConfig::from_site_config(&site).is_err());
    }

    #[test]
    fn zoom_scale_is_clamped() {
        let z = ZoomTransform {
            scale: 50.0,
            translate: [1.0, 2.0],
        }
        .clamped();
        assert_eq!(z.scale, MAX_ZOOM);
        assert_eq!(z.translate, [1.0, 2.0]);
        assert_eq!(ZoomTransform { scale: 0.0, ..Default::default() }.clamped().scale, MIN_ZOOM);
    }
}

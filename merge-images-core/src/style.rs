//! Turn placement rectangles into CSS-like display styles.
//!
//! A sub-image is shown through a fixed box the size of its rectangle, with `object-fit: none` and a
//! negative `object-position` selecting the region of the atlas. The scaled variant keeps that box
//! and applies `transform: scale(s)` from the top-left corner, pulling the layout footprint back in
//! with negative margins of `dimension * (1 - s)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::{CoordinateTable, PlacementRect};
use crate::{Result, SpriteError};

pub const OBJECT_FIT: &str = "none";
pub const DISPLAY: &str = "inline-block";
pub const TRANSFORM_ORIGIN: &str = "top left";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    pub object_fit: String,
    pub object_position: String,
    pub width: String,
    pub height: String,
    pub display: String,
}

/// Logical name -> display style, one entry per coordinate-table entry.
pub type StyleDescriptor = BTreeMap<String, StyleEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledStyle {
    pub width: String,
    pub height: String,
    pub object_fit: String,
    pub object_position: String,
    pub transform: String,
    pub transform_origin: String,
    pub margin_bottom: String,
    pub margin_right: String,
}

fn px(v: u32) -> String { format!("{}px", v) }

fn object_position(rect: &PlacementRect) -> String { format!("-{}px -{}px", rect.x, rect.y) }

/// Number formatting that matches how a JavaScript host stringifies the same value: shortest
/// round-trip digits, `-0` as `0`, and exponent notation outside `1e-6 <= |v| < 1e21`.
pub(crate) fn js_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return if v.is_nan() { "NaN".into() } else if v > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let magnitude = v.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return v.to_string();
    }
    let exp = format!("{:e}", v);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

impl StyleEntry {
    pub fn from_rect(rect: &PlacementRect) -> Self {
        Self {
            object_fit: OBJECT_FIT.to_string(),
            object_position: object_position(rect),
            width: px(rect.width),
            height: px(rect.height),
            display: DISPLAY.to_string(),
        }
    }
}

impl PlacementRect {
    /// Parse the offset and size fields back out of a style entry.
    pub fn from_style_entry(entry: &StyleEntry) -> Option<Self> {
        fn parse_px(s: &str) -> Option<u32> { s.trim().strip_suffix("px")?.parse().ok() }
        let mut offsets = entry.object_position.split_whitespace();
        let x = parse_px(offsets.next()?.strip_prefix('-')?)?;
        let y = parse_px(offsets.next()?.strip_prefix('-')?)?;
        if offsets.next().is_some() { return None; }
        Some(Self::new(x, y, parse_px(&entry.width)?, parse_px(&entry.height)?))
    }
}

/// Style table for every entry of `coords`.
pub fn derive_styles(coords: &CoordinateTable) -> StyleDescriptor {
    coords.iter().map(|(name, rect)| (name.clone(), StyleEntry::from_rect(rect))).collect()
}

/// Scaled style for one logical name. `scale` must be positive and finite; `1.0` gives zero margins.
pub fn get_image_style(coords: &CoordinateTable, name: &str, scale: f64) -> Result<ScaledStyle> {
    let rect = coords.get(name).ok_or_else(|| SpriteError::NotFound { name: name.to_string() })?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(SpriteError::InvalidScale(scale));
    }
    let shrink = 1.0 - scale;
    Ok(ScaledStyle {
        width: px(rect.width),
        height: px(rect.height),
        object_fit: OBJECT_FIT.to_string(),
        object_position: object_position(rect),
        transform: format!("scale({})", js_number(scale)),
        transform_origin: TRANSFORM_ORIGIN.to_string(),
        margin_bottom: format!("{}px", js_number(-(rect.height as f64 * shrink))),
        margin_right: format!("{}px", js_number(-(rect.width as f64 * shrink))),
    })
}

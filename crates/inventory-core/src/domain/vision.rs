//! Vision Results
//!
//! Structured records returned by the remote vision service.

use serde::{Deserialize, Serialize};

/// Identification of a single photographed asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemAnalysis {
    pub object_name: String,
    pub category: String,
    #[serde(default)]
    pub estimated_specs: String,
    /// Suggested SKU in `XXX-000` form
    #[serde(rename = "likelySKU", default)]
    pub likely_sku: String,
    #[serde(default)]
    pub barcode_value: Option<String>,
    #[serde(default)]
    pub suggested_location: String,
    /// 0.0 ..= 1.0
    #[serde(default)]
    pub confidence: f64,
}

impl ItemAnalysis {
    /// Confidence as a whole percentage for display
    pub fn confidence_pct(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Barcode value with blanks and "None" filtered out
    pub fn barcode(&self) -> Option<String> {
        normalize_code(self.barcode_value.as_deref())
    }
}

/// One object found during live detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub confidence: f64,
    /// `[ymin, xmin, ymax, xmax]`, normalized to 0..=1000
    pub box_2d: [f64; 4],
}

/// Overlay rectangle in percent of the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl DetectedObject {
    pub fn bounding_box(&self) -> BoundingBox {
        let [ymin, xmin, ymax, xmax] = self.box_2d.map(|v| v.clamp(0.0, 1000.0) / 10.0);
        BoundingBox {
            top: ymin,
            left: xmin,
            width: (xmax - xmin).max(0.0),
            height: (ymax - ymin).max(0.0),
        }
    }
}

/// Clean up a decoded barcode / OCR reply.
///
/// The service answers the literal `None` when nothing was found; codes of
/// two characters or fewer are treated as noise.
pub fn normalize_code(raw: Option<&str>) -> Option<String> {
    let text = raw?.trim().trim_matches('`').trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") || text.eq_ignore_ascii_case("null") {
        return None;
    }
    (text.chars().count() > 2).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_wire_format() {
        let raw = r#"{"objectName":"Drill","category":"Tools","likelySKU":"DRL-001",
            "barcodeValue":null,"suggestedLocation":"Bay 2","confidence":0.87}"#;
        let a: ItemAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(a.likely_sku, "DRL-001");
        assert_eq!(a.estimated_specs, "");
        assert_eq!(a.confidence_pct(), 87);
        assert!(a.barcode().is_none());
    }

    #[test]
    fn test_bounding_box_percent() {
        let obj = DetectedObject { label: "box".into(), confidence: 0.5, box_2d: [100.0, 200.0, 600.0, 700.0] };
        let b = obj.bounding_box();
        assert_eq!(b.top, 10.0);
        assert_eq!(b.left, 20.0);
        assert_eq!(b.width, 50.0);
        assert_eq!(b.height, 50.0);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(Some(" 0123456789 \n")), Some("0123456789".into()));
        assert_eq!(normalize_code(Some("None")), None);
        assert_eq!(normalize_code(Some("ab")), None);
        assert_eq!(normalize_code(None), None);
    }
}

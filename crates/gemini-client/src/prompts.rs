//! Instructions and response schemas sent with each request

use serde_json::{json, Value};

pub const ANALYZE_PROMPT: &str = "Analyze this inventory item. Check for barcodes/QR. \
Return JSON: objectName, category, estimatedSpecs, likelySKU (XXX-000), barcodeValue (null if none), \
suggestedLocation, confidence (0-1).";

pub const DETECT_PROMPT: &str = "Detect prominent inventory items. Provide JSON array with: label, \
confidence (0-1), box_2d [ymin, xmin, ymax, xmax] (0-1000).";

pub const BARCODE_PROMPT: &str = "Identify and extract the text from any barcode or QR code in this image. \
Return only the extracted value string. If no code is found, return 'None'.";

pub const OCR_PROMPT: &str = "Perform advanced OCR to find product identifiers such as SKU, Serial Number (S/N), \
or Part Number (P/N). Return ONLY the identifier text. If nothing found, return 'None'.";

/// Reasoning budget for assistant replies
pub const CHAT_THINKING_BUDGET: i32 = 4000;

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "objectName": { "type": "STRING" },
            "category": { "type": "STRING" },
            "estimatedSpecs": { "type": "STRING" },
            "likelySKU": { "type": "STRING" },
            "barcodeValue": { "type": "STRING", "nullable": true },
            "suggestedLocation": { "type": "STRING" },
            "confidence": { "type": "NUMBER" }
        },
        "required": ["objectName", "category", "likelySKU", "suggestedLocation"]
    })
}

pub fn detection_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "label": { "type": "STRING" },
                "confidence": { "type": "NUMBER" },
                "box_2d": {
                    "type": "ARRAY",
                    "items": { "type": "NUMBER" },
                    "description": "[ymin, xmin, ymax, xmax]"
                }
            },
            "required": ["label", "confidence", "box_2d"]
        }
    })
}

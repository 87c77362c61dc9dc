// Version information for the Fabstir OCR Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-chinese-ocr-upload-2026-08-31";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-31";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multipart-upload",
    "chinese-ocr",
    "angle-classification",
    "image-preprocessing",
    "per-file-error-containment",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Fabstir OCR Node {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}

//! Remote Service Seams
//!
//! The vision and chat backends are reached through these traits so the
//! UI does not care which HTTP client sits behind them. Futures are not
//! `Send`: everything runs on the browser's event loop.

use async_trait::async_trait;

use crate::chat::ChatTurn;
use crate::domain::{normalize_code, DetectedObject, ItemAnalysis};
use crate::error::{AppError, AppResult};

#[async_trait(?Send)]
pub trait VisionService {
    /// Identify the asset in a still frame
    async fn analyze_item(&self, image_b64: &str) -> AppResult<ItemAnalysis>;

    /// Find prominent objects for the live overlay
    async fn detect_objects(&self, image_b64: &str) -> AppResult<Vec<DetectedObject>>;

    /// Decode a barcode / QR code. `Ok(None)` when nothing was found.
    async fn extract_barcode(&self, image_b64: &str) -> AppResult<Option<String>>;

    /// Advanced OCR for printed identifiers (SKU, S/N, P/N)
    async fn read_identifier(&self, image_b64: &str) -> AppResult<Option<String>>;
}

#[async_trait(?Send)]
pub trait ChatService {
    /// Stream the reply to `turn`, calling `on_chunk` with each text delta
    async fn stream_reply(&self, turn: &ChatTurn, on_chunk: &mut dyn for<'a> FnMut(&'a str)) -> AppResult<()>;
}

/// Analyze a frame and insist on a usable answer
pub async fn analyze_frame<V: VisionService + ?Sized>(vision: &V, image_b64: &str) -> AppResult<ItemAnalysis> {
    let analysis = vision.analyze_item(image_b64).await?;
    if analysis.object_name.trim().is_empty() {
        return Err(AppError::RecognitionFailed("no object identified".into()));
    }
    Ok(analysis)
}

/// Read a code from a frame. `advanced` switches from barcode decoding to
/// OCR of printed identifiers.
pub async fn scan_code<V: VisionService + ?Sized>(vision: &V, image_b64: &str, advanced: bool) -> AppResult<String> {
    let raw = if advanced {
        vision.read_identifier(image_b64).await?
    } else {
        vision.extract_barcode(image_b64).await?
    };
    normalize_code(raw.as_deref()).ok_or_else(|| {
        AppError::RecognitionFailed(if advanced {
            "Deep analysis failed to read text.".into()
        } else {
            "Scan failed to find code.".into()
        })
    })
}

/// Live detection never surfaces errors; a failed poll clears the overlay.
pub async fn detect_or_empty<V: VisionService + ?Sized>(vision: &V, image_b64: &str) -> Vec<DetectedObject> {
    match vision.detect_objects(image_b64).await {
        Ok(objects) => objects,
        Err(e) => {
            log::warn!("object detection failed: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Transcript;
    use chrono::Utc;

    struct FakeVision {
        barcode: Option<&'static str>,
        ocr: Option<&'static str>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl VisionService for FakeVision {
        async fn analyze_item(&self, _image: &str) -> AppResult<ItemAnalysis> {
            if self.fail {
                return Err(AppError::Service("offline".into()));
            }
            Ok(ItemAnalysis::default())
        }

        async fn detect_objects(&self, _image: &str) -> AppResult<Vec<DetectedObject>> {
            if self.fail {
                return Err(AppError::Service("offline".into()));
            }
            Ok(vec![DetectedObject { label: "box".into(), confidence: 0.9, box_2d: [0.0, 0.0, 10.0, 10.0] }])
        }

        async fn extract_barcode(&self, _image: &str) -> AppResult<Option<String>> {
            Ok(self.barcode.map(str::to_string))
        }

        async fn read_identifier(&self, _image: &str) -> AppResult<Option<String>> {
            Ok(self.ocr.map(str::to_string))
        }
    }

    struct EchoChat;

    #[async_trait(?Send)]
    impl ChatService for EchoChat {
        async fn stream_reply(&self, turn: &ChatTurn, on_chunk: &mut dyn for<'a> FnMut(&'a str)) -> AppResult<()> {
            for word in turn.message.split(' ') {
                on_chunk(word);
                on_chunk(" ");
            }
            Ok(())
        }
    }

    /// Emits chunks built inside the call, so they only borrow locals
    struct ShoutingChat;

    #[async_trait(?Send)]
    impl ChatService for ShoutingChat {
        async fn stream_reply(&self, turn: &ChatTurn, on_chunk: &mut dyn for<'a> FnMut(&'a str)) -> AppResult<()> {
            for word in turn.message.split_whitespace() {
                let chunk = format!("{}!", word.to_uppercase());
                on_chunk(&chunk);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_scan_code_falls_back_to_failure() {
        let vision = FakeVision { barcode: Some("None"), ocr: Some("SN-99812"), fail: false };
        let err = scan_code(&vision, "img", false).await.unwrap_err();
        assert_eq!(err, AppError::RecognitionFailed("Scan failed to find code.".into()));
        assert_eq!(scan_code(&vision, "img", true).await.unwrap(), "SN-99812");
    }

    #[tokio::test]
    async fn test_blank_analysis_is_recognition_failure() {
        let vision = FakeVision { barcode: None, ocr: None, fail: false };
        let err = analyze_frame(&vision, "img").await.unwrap_err();
        assert!(matches!(err, AppError::RecognitionFailed(_)));
    }

    #[tokio::test]
    async fn test_detection_errors_clear_overlay() {
        let vision = FakeVision { barcode: None, ocr: None, fail: true };
        assert!(detect_or_empty(&vision, "img").await.is_empty());
        assert!(matches!(analyze_frame(&vision, "img").await, Err(AppError::Service(_))));
    }

    #[tokio::test]
    async fn test_stream_into_transcript() {
        let now = Utc::now();
        let mut transcript = Transcript::new("hi".into(), now);
        let turn = transcript.begin_turn("count the mice", &[], now).unwrap();
        EchoChat
            .stream_reply(&turn, &mut |chunk| transcript.push_chunk(chunk))
            .await
            .unwrap();
        transcript.finish();
        assert_eq!(transcript.messages().last().unwrap().text, "count the mice ");
    }

    #[tokio::test]
    async fn test_stream_accepts_locally_built_chunks() {
        let now = Utc::now();
        let mut transcript = Transcript::new("hi".into(), now);
        let turn = transcript.begin_turn("low stock", &[], now).unwrap();
        let chat: &dyn ChatService = &ShoutingChat;
        chat.stream_reply(&turn, &mut |chunk| transcript.push_chunk(chunk))
            .await
            .unwrap();
        transcript.finish();
        assert_eq!(transcript.messages().last().unwrap().text, "LOW!STOCK!");
    }
}

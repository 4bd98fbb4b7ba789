//! Leptos Camera Utilities
//!
//! Camera streams, frame capture and image uploads for Leptos CSR apps.
//! A `CameraStream` owns its `MediaStream` and stops every track when
//! dropped, so the device indicator never outlives the component.

use leptos::prelude::*;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamTrack};

/// `HAVE_ENOUGH_DATA`
const READY_STATE_ENOUGH_DATA: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Camera permission was denied")]
    PermissionDenied,
    #[error("Camera unavailable: {0}")]
    HardwareUnavailable(String),
    #[error("Video frame not ready")]
    NotReady,
    #[error("Could not read image: {0}")]
    Read(String),
}

impl CameraError {
    /// Classify a `getUserMedia` rejection by its DOMException name
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => CameraError::PermissionDenied,
            _ if message.is_empty() => CameraError::HardwareUnavailable(name.to_string()),
            _ => CameraError::HardwareUnavailable(format!("{}: {}", name, message)),
        }
    }

    fn from_js(err: JsValue) -> Self {
        match err.dyn_ref::<web_sys::DomException>() {
            Some(dom) => Self::from_dom_name(&dom.name(), &dom.message()),
            None => CameraError::HardwareUnavailable(format!("{:?}", err)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacingMode {
    Environment,
    User,
}

impl FacingMode {
    fn as_str(&self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

/// What to ask `getUserMedia` for
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamRequest {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl StreamRequest {
    /// Rear camera, 1080p: full-frame asset capture
    pub const SCANNER: Self = Self { facing: FacingMode::Environment, ideal_width: 1920, ideal_height: 1080 };
    /// Rear camera, square-ish: close-up label reading
    pub const LABEL: Self = Self { facing: FacingMode::Environment, ideal_width: 1080, ideal_height: 1080 };

    fn constraints(&self) -> Result<web_sys::MediaStreamConstraints, CameraError> {
        let ideal = |v: u32| -> Result<js_sys::Object, CameraError> {
            let obj = js_sys::Object::new();
            set(&obj, "ideal", &JsValue::from(v))?;
            Ok(obj)
        };
        let video = js_sys::Object::new();
        set(&video, "facingMode", &JsValue::from_str(self.facing.as_str()))?;
        set(&video, "width", &ideal(self.ideal_width)?.into())?;
        set(&video, "height", &ideal(self.ideal_height)?.into())?;

        let constraints = web_sys::MediaStreamConstraints::new();
        constraints.set_video(&video);
        constraints.set_audio(&JsValue::FALSE);
        Ok(constraints)
    }
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), CameraError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(CameraError::from_js)
}

/// JPEG encoding of a captured frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOptions {
    pub quality: f64,
    /// Longest side in pixels; `None` keeps the native resolution
    pub max_dimension: Option<u32>,
}

impl FrameOptions {
    pub const DETECTION: Self = Self { quality: 0.6, max_dimension: Some(640) };
    pub const ANALYSIS: Self = Self { quality: 0.85, max_dimension: None };
    pub const LABEL: Self = Self { quality: 0.8, max_dimension: None };
}

/// Owned camera stream
pub struct CameraStream {
    stream: MediaStream,
}

impl CameraStream {
    pub async fn open(request: StreamRequest) -> Result<Self, CameraError> {
        let window = web_sys::window().ok_or_else(|| CameraError::HardwareUnavailable("no window".into()))?;
        let devices = window.navigator().media_devices().map_err(CameraError::from_js)?;
        let promise = devices
            .get_user_media_with_constraints(&request.constraints()?)
            .map_err(CameraError::from_js)?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(CameraError::from_js)?
            .dyn_into::<MediaStream>()
            .map_err(CameraError::from_js)?;
        log::info!("camera stream opened ({})", request.facing.as_str());
        Ok(Self { stream })
    }

    /// Bind to a `<video>` element and start playback
    pub async fn attach(&self, video: &HtmlVideoElement) -> Result<(), CameraError> {
        video.set_src_object(Some(&self.stream));
        let playing = video.play().map_err(CameraError::from_js)?;
        JsFuture::from(playing).await.map_err(CameraError::from_js)?;
        Ok(())
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        log::debug!("camera stream stopped");
    }
}

/// Whether the element has a frame worth sampling
pub fn is_frame_ready(video: &HtmlVideoElement) -> bool {
    video.ready_state() >= READY_STATE_ENOUGH_DATA && video.video_width() > 0
}

/// Output size when fitting `(width, height)` under `max_dimension`
pub fn scaled_size(width: u32, height: u32, max_dimension: Option<u32>) -> (u32, u32) {
    let longest = width.max(height);
    match max_dimension {
        Some(max) if longest > 0 => {
            let scale = max as f64 / longest as f64;
            (((width as f64) * scale).round() as u32, ((height as f64) * scale).round() as u32)
        }
        _ => (width, height),
    }
}

/// Draw the current frame onto an offscreen canvas and encode it as a
/// JPEG data URL.
pub fn capture_frame(video: &HtmlVideoElement, options: FrameOptions) -> Result<String, CameraError> {
    if video.video_width() == 0 || video.video_height() == 0 {
        return Err(CameraError::NotReady);
    }
    let (width, height) = scaled_size(video.video_width(), video.video_height(), options.max_dimension);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| CameraError::HardwareUnavailable("no document".into()))?;
    let canvas = document
        .create_element("canvas")
        .map_err(CameraError::from_js)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|e| CameraError::from_js(e.into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context = canvas
        .get_context("2d")
        .map_err(CameraError::from_js)?
        .ok_or(CameraError::NotReady)?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|e| CameraError::from_js(e.into()))?;
    context
        .draw_image_with_html_video_element_and_dw_and_dh(video, 0.0, 0.0, width as f64, height as f64)
        .map_err(CameraError::from_js)?;

    canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(options.quality))
        .map_err(CameraError::from_js)
}

/// The base64 part of a `data:` URL
pub fn base64_payload(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => data_url,
    }
}

/// Read an uploaded file as a data URL
pub async fn read_file_as_data_url(file: web_sys::File) -> Result<String, CameraError> {
    let reader = web_sys::FileReader::new().map_err(CameraError::from_js)?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = {
            let reader = reader.clone();
            Closure::once_into_js(move || {
                let _ = resolve.call1(&JsValue::NULL, &reader.result().unwrap_or(JsValue::NULL));
            })
        };
        let on_error = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("file read failed"));
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
    });
    reader.read_as_data_url(&file).map_err(CameraError::from_js)?;

    let result = JsFuture::from(promise)
        .await
        .map_err(|e| CameraError::Read(e.as_string().unwrap_or_default()))?;
    result
        .as_string()
        .ok_or_else(|| CameraError::Read("unexpected reader result".into()))
}

/// Counts camera sessions. Every start or stop opens a new generation; a
/// start that resolves under an older generation was cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    /// Open a new generation and return its ticket
    pub fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Camera bound to a `<video>` node, scoped to the calling component.
///
/// The stream is released on `stop`, on a restart and when the owning
/// reactive scope is cleaned up. A `stop` issued while `start` is still
/// waiting for the device cancels that start.
#[derive(Clone, Copy)]
pub struct CameraController {
    video: NodeRef<leptos::html::Video>,
    stream: StoredValue<Option<CameraStream>, LocalStorage>,
    generation: StoredValue<Generation>,
    live: RwSignal<bool>,
    request: StreamRequest,
}

impl CameraController {
    pub fn new(video: NodeRef<leptos::html::Video>, request: StreamRequest) -> Self {
        let stream = StoredValue::new_local(None::<CameraStream>);
        let generation = StoredValue::new(Generation::default());
        let live = RwSignal::new(false);
        on_cleanup(move || {
            generation.try_update_value(|g| g.advance());
            stream.try_update_value(|s| s.take());
            live.try_set(false);
        });
        Self { video, stream, generation, live, request }
    }

    pub fn live(&self) -> Signal<bool> {
        self.live.into()
    }

    /// Open the camera and attach it to the video node. Returns `Ok` without
    /// a live stream when `stop` ran (or the owner was cleaned up) while
    /// the device was being acquired; that stream is dropped on the spot.
    pub async fn start(self) -> Result<(), CameraError> {
        self.stop();
        let Some(ticket) = self.generation.try_update_value(|g| g.advance()) else {
            return Ok(());
        };
        let stream = CameraStream::open(self.request).await?;
        if !self.is_current(ticket) {
            log::debug!("camera start cancelled before attach");
            return Ok(());
        }
        let video = self.video.get_untracked().ok_or(CameraError::NotReady)?;
        stream.attach(&video).await?;
        if !self.is_current(ticket) {
            log::debug!("camera start cancelled after attach");
            return Ok(());
        }
        if self.stream.try_set_value(Some(stream)).is_some() {
            return Ok(());
        }
        self.live.try_set(true);
        Ok(())
    }

    pub fn stop(&self) {
        self.generation.try_update_value(|g| g.advance());
        self.stream.try_update_value(|s| s.take());
        self.live.try_set(false);
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.try_with_value(|g| g.is_current(ticket)).unwrap_or(false)
    }

    pub fn is_ready(&self) -> bool {
        self.live.get_untracked() && self.video.get_untracked().is_some_and(|v| is_frame_ready(&v))
    }

    /// Grab a frame as a JPEG data URL
    pub fn capture(&self, options: FrameOptions) -> Result<String, CameraError> {
        let video = self.video.get_untracked().ok_or(CameraError::NotReady)?;
        capture_frame(&video, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1920, 1080, Some(640), (640, 360))]
    #[case(1080, 1920, Some(640), (360, 640))]
    #[case(1280, 720, None, (1280, 720))]
    #[case(0, 0, Some(640), (0, 0))]
    fn test_scaled_size(#[case] w: u32, #[case] h: u32, #[case] max: Option<u32>, #[case] expected: (u32, u32)) {
        assert_eq!(scaled_size(w, h, max), expected);
    }

    #[test]
    fn test_stop_during_start_cancels_it() {
        let mut generation = Generation::default();
        let starting = generation.advance();
        assert!(generation.is_current(starting));

        generation.advance();
        assert!(!generation.is_current(starting));

        let restarted = generation.advance();
        assert!(generation.is_current(restarted));
        assert!(!generation.is_current(starting));
    }

    #[test]
    fn test_base64_payload() {
        assert_eq!(base64_payload("data:image/jpeg;base64,/9j/AAA"), "/9j/AAA");
        assert_eq!(base64_payload("/9j/AAA"), "/9j/AAA");
    }

    #[rstest]
    #[case("NotAllowedError", CameraError::PermissionDenied)]
    #[case("PermissionDeniedError", CameraError::PermissionDenied)]
    #[case("NotFoundError", CameraError::HardwareUnavailable("NotFoundError".into()))]
    fn test_dom_error_classification(#[case] name: &str, #[case] expected: CameraError) {
        assert_eq!(CameraError::from_dom_name(name, ""), expected);
    }
}

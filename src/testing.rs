//! Scripted stand-ins for the remote backend and camera hardware.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, Rgb};
use tokio::sync::oneshot;

use crate::camera::{CaptureDevice, CaptureStream};
use crate::common::ImagePayload;
use crate::config::Facing;
use crate::error::{CameraError, InferenceError};
use crate::pipeline::services::{InferenceBackend, RecommendationRequest, RecommendedFood};
use crate::pipeline::types::{
    AllergenCheck, AllergenQuery, Classification, ExtractedText, FoodDetails, RiskLevel,
};

type Script<T> = Mutex<VecDeque<Result<T, InferenceError>>>;

/// Keeps one call pending until `release` fires or is dropped.
pub(crate) struct HeldCall {
    pub release: oneshot::Sender<()>,
    pub entered: oneshot::Receiver<()>,
}

struct Gate {
    release: oneshot::Receiver<()>,
    entered: oneshot::Sender<()>,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    classifications: Script<Classification>,
    texts: Script<ExtractedText>,
    checks: Script<AllergenCheck>,
    recommendations: Script<Vec<RecommendedFood>>,
    allergen_gate: Mutex<Option<Gate>>,
    classify_calls: AtomicUsize,
    extract_text_calls: AtomicUsize,
    check_calls: AtomicUsize,
    recommend_calls: AtomicUsize,
    last_query: Mutex<Option<AllergenQuery>>,
    last_recommendation_request: Mutex<Option<RecommendationRequest>>,
}

fn unscripted<T>() -> Result<T, InferenceError> {
    Err(InferenceError::Api(500, "no scripted response".to_string()))
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn food(ingredients: &[&str]) -> Classification {
        Classification {
            label: "dish".to_string(),
            confidence: 0.9,
            is_food: true,
            food_details: Some(FoodDetails {
                ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
                ..FoodDetails::default()
            }),
            alternative_suggestions: Vec::new(),
        }
    }

    pub fn not_food() -> Classification {
        Classification {
            label: "shoe".to_string(),
            confidence: 0.95,
            is_food: false,
            food_details: None,
            alternative_suggestions: vec!["sandal".to_string()],
        }
    }

    pub fn check(risk_level: RiskLevel, detected: &[&str]) -> AllergenCheck {
        AllergenCheck {
            risk_level,
            allergen_detected: !detected.is_empty(),
            detected_allergens: detected.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn push_classification(&self, result: Result<Classification, InferenceError>) {
        self.classifications.lock().unwrap().push_back(result);
    }

    pub fn push_text(&self, result: Result<ExtractedText, InferenceError>) {
        self.texts.lock().unwrap().push_back(result);
    }

    pub fn push_check(&self, result: Result<AllergenCheck, InferenceError>) {
        self.checks.lock().unwrap().push_back(result);
    }

    pub fn push_recommendation(&self, result: Result<Vec<RecommendedFood>, InferenceError>) {
        self.recommendations.lock().unwrap().push_back(result);
    }

    pub fn hold_next_allergen_check(&self) -> HeldCall {
        let (release_tx, release_rx) = oneshot::channel();
        let (entered_tx, entered_rx) = oneshot::channel();
        *self.allergen_gate.lock().unwrap() = Some(Gate {
            release: release_rx,
            entered: entered_tx,
        });
        HeldCall {
            release: release_tx,
            entered: entered_rx,
        }
    }

    pub fn classify_calls(&self) -> usize {
        self.classify_calls.load(Ordering::SeqCst)
    }

    pub fn extract_text_calls(&self) -> usize {
        self.extract_text_calls.load(Ordering::SeqCst)
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn recommend_calls(&self) -> usize {
        self.recommend_calls.load(Ordering::SeqCst)
    }

    pub fn remote_calls(&self) -> usize {
        self.classify_calls() + self.extract_text_calls() + self.check_calls()
    }

    pub fn last_query(&self) -> Option<AllergenQuery> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn last_recommendation_request(&self) -> Option<RecommendationRequest> {
        self.last_recommendation_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceBackend for FakeBackend {
    async fn classify(&self, _image: &ImagePayload) -> Result<Classification, InferenceError> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        self.classifications
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn extract_text(&self, _image: &ImagePayload) -> Result<ExtractedText, InferenceError> {
        self.extract_text_calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().pop_front().unwrap_or_else(unscripted)
    }

    async fn check_allergens(
        &self,
        query: &AllergenQuery,
    ) -> Result<AllergenCheck, InferenceError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        let response = self.checks.lock().unwrap().pop_front().unwrap_or_else(unscripted);

        let gate = self.allergen_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }
        response
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedFood>, InferenceError> {
        self.recommend_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_recommendation_request.lock().unwrap() = Some(request.clone());
        self.recommendations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

#[derive(Default)]
struct DeviceCounters {
    live: AtomicUsize,
    max_live: AtomicUsize,
    opened: AtomicUsize,
    stopped: AtomicUsize,
}

/// Capture device that records how many streams are live at once.
#[derive(Clone, Default)]
pub(crate) struct FakeDevice {
    counters: Arc<DeviceCounters>,
    failures: Arc<Mutex<VecDeque<CameraError>>>,
    last_facing: Arc<Mutex<Option<Facing>>>,
    request_gate: Arc<Mutex<Option<Gate>>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_failure(&self, error: CameraError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Holds the next stream request as if a permission prompt were open.
    pub fn hold_next_request(&self) -> HeldCall {
        let (release_tx, release_rx) = oneshot::channel();
        let (entered_tx, entered_rx) = oneshot::channel();
        *self.request_gate.lock().unwrap() = Some(Gate {
            release: release_rx,
            entered: entered_tx,
        });
        HeldCall {
            release: release_tx,
            entered: entered_rx,
        }
    }

    pub fn live_streams(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    pub fn max_live_streams(&self) -> usize {
        self.counters.max_live.load(Ordering::SeqCst)
    }

    pub fn streams_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn streams_stopped(&self) -> usize {
        self.counters.stopped.load(Ordering::SeqCst)
    }

    pub fn last_facing(&self) -> Option<Facing> {
        *self.last_facing.lock().unwrap()
    }
}

#[async_trait]
impl CaptureDevice for FakeDevice {
    async fn request_stream(&self, facing: Facing) -> Result<Box<dyn CaptureStream>, CameraError> {
        *self.last_facing.lock().unwrap() = Some(facing);
        let gate = self.request_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let live = self.counters.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.max_live.fetch_max(live, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            counters: self.counters.clone(),
            live: true,
        }))
    }
}

struct FakeStream {
    counters: Arc<DeviceCounters>,
    live: bool,
}

impl CaptureStream for FakeStream {
    fn grab_frame(&mut self) -> Result<DynamicImage, CameraError> {
        if !self.live {
            return Err(CameraError::Other("stream stopped".to_string()));
        }
        Ok(DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
            6,
            4,
            Rgb([120, 80, 40]),
        )))
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
            self.counters.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

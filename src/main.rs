use std::path::PathBuf;
use std::sync::Arc;

use allergen_scan::camera::StillFrameDevice;
use allergen_scan::common::AllergenProfile;
use allergen_scan::error::{AppError, IntakeError};
use allergen_scan::pipeline::{HttpInferenceClient, PipelineKind, RecommendationService};
use allergen_scan::session::{ConnectivityFlag, Notifier, SessionView};
use allergen_scan::{ScanController, Settings};
use clap::Parser;
use image::DynamicImage;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "allergen-scan", about = "Check a food photo or ingredient label for allergens")]
struct Cli {
    /// Image to analyze
    image: PathBuf,

    /// Read the ingredient label instead of classifying the dish
    #[arg(long)]
    label: bool,

    /// Allergen to check for (repeatable)
    #[arg(long = "allergen", value_name = "NAME")]
    allergens: Vec<String>,

    /// Feed the image through the camera path instead of uploading it
    #[arg(long)]
    camera: bool,

    /// Also ask for dishes of this cuisine that avoid the allergens
    #[arg(long, value_name = "CUISINE")]
    recommend: Option<String>,

    #[arg(long, env = "ALLERGEN_SCAN_CONFIG")]
    config: Option<String>,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(settings.logging.max_level());

    let bytes = std::fs::read(&cli.image).map_err(|source| AppError::Io {
        path: cli.image.display().to_string(),
        source,
    })?;

    let backend = Arc::new(HttpInferenceClient::new(&settings.inference)?);
    let connectivity = Arc::new(ConnectivityFlag::default());
    let (notifier, mut notifications) = Notifier::channel(settings.notifications.buffer_size);

    // The device is only opened with --camera.
    let still = if cli.camera {
        image::load_from_memory(&bytes).map_err(IntakeError::from)?
    } else {
        DynamicImage::new_rgb8(1, 1)
    };

    let controller = ScanController::new(
        &settings,
        backend.clone(),
        Arc::new(StillFrameDevice::new(still)),
        connectivity.clone(),
        notifier.clone(),
    );

    if cli.label {
        controller.switch_kind(PipelineKind::ScanLabel);
    }
    if cli.camera {
        controller.open_camera().await?;
        controller.capture()?;
    } else {
        controller.upload(&bytes, None)?;
    }

    let profile = AllergenProfile::new(cli.allergens);
    match controller.submit(&profile).await {
        Ok(outcome) => info!("Run finished: {:?}", outcome),
        Err(e) => warn!("Run did not complete: {}", e),
    }
    report(&controller.view());

    if let Some(cuisine) = cli.recommend.as_deref() {
        let recommendations = RecommendationService::new(backend, connectivity, notifier);
        match recommendations.recommend(&profile, cuisine).await {
            Ok(foods) => {
                for food in foods {
                    info!("Recommended: {} - {}", food.name, food.description);
                }
            }
            Err(e) => warn!("No recommendations: {}", e),
        }
    }

    controller.shutdown();
    while let Ok(notification) = notifications.try_recv() {
        warn!("{}: {}", notification.title, notification.message);
    }
    Ok(())
}

fn report(view: &SessionView) {
    info!("Phase: {:?}", view.phase);
    if let Some(classification) = view.classification() {
        info!(
            "Recognized '{}' ({:.0}% confidence, food: {})",
            classification.label,
            classification.confidence * 100.0,
            classification.is_food
        );
    }
    if let Some(text) = view.extracted_text() {
        info!("Label text: {}", text.text);
    }
    if let Some(check) = view.allergen_check() {
        info!("Detected allergens: {:?}", check.detected_allergens);
    }
    info!("Risk: {}", view.risk_level().label());
    if let Some(banner) = &view.error_banner {
        warn!("{}", banner);
    }
}

mod args;

use args::{Args, Mode};
use screen_watch::inference::{
    AnyDetector, ColorBandTable, DialogBubbleConfig, DialogBubbleDetector, Detector, Frame,
    MapDestinationMenuDetector, MapFlyMenuDetector, NormalizedBox, install_bands,
    sort_by_screen_side,
};
use screen_watch::watch::{
    DetectorWatcher, ImageOverlay, OverlaySink, ReplayFrameSource, VisualWatcher,
    create_cancel_channel, wait_until,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match &args.mode {
        Mode::Detect { image } => run_detect(&args, image),
        Mode::Replay { dir } => run_replay(&args, dir),
    };
    if let Err(e) = result {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

/// Bubble detector from the installed band table, or from a JSON file.
fn build_detectors(args: &Args) -> Result<Vec<AnyDetector>, String> {
    let table = install_bands(ColorBandTable::standard())
        .map_err(|e| format!("Colour bands: {e}"))?;
    let config = match &args.config_path {
        Some(path) => DialogBubbleConfig::load_json(path).map_err(|e| e.to_string())?,
        None => DialogBubbleConfig::from_bands(table).map_err(|e| e.to_string())?,
    };
    let bubbles = DialogBubbleDetector::new(config).map_err(|e| format!("Bubble config: {e}"))?;

    Ok(vec![
        bubbles.into(),
        MapFlyMenuDetector::default().into(),
        MapDestinationMenuDetector::default().into(),
    ])
}

fn run_detect(args: &Args, image_path: &Path) -> Result<(), String> {
    let image = image::open(image_path)
        .map_err(|e| format!("Failed to load {}: {e}", image_path.display()))?;
    let frame = Frame::from_dynamic(image).map_err(|e| e.to_string())?;
    println!(
        "🖼️ {} ({}x{})",
        image_path.display(),
        frame.width(),
        frame.height()
    );

    let overlay = ImageOverlay::new();
    for detector in build_detectors(args)? {
        let hits = detector.detect_all(&frame).map_err(|e| e.to_string())?;
        println!("🔍 {}: {} hit(s)", detector.name(), hits.len());
        for hit in &hits {
            let (cx, cy) = hit.center();
            println!(
                "   ({:.3}, {:.3}) {:.3}x{:.3} center=({:.3}, {:.3}) {}",
                hit.bbox.x,
                hit.bbox.y,
                hit.bbox.width,
                hit.bbox.height,
                cx,
                cy,
                hit.label.as_deref().unwrap_or("")
            );
        }
        for region in detector.describe_regions() {
            overlay.add(detector.color(), region);
        }
        let layer = overlay.add_layer(screen_watch::watch::watcher::HIT_COLOR);
        overlay.publish(layer, &hits.iter().map(|h| h.bbox).collect::<Vec<_>>());
    }

    if let Some(out) = &args.overlay_path {
        save_overlay(&overlay, &frame, out)?;
    }
    Ok(())
}

fn run_replay(args: &Args, dir: &Path) -> Result<(), String> {
    let mut source = ReplayFrameSource::from_dir(dir, Duration::from_millis(args.interval_ms))
        .map_err(|e| e.to_string())?;
    let overlay = Arc::new(ImageOverlay::new());

    let rt = tokio::runtime::Runtime::new().map_err(|e| format!("Tokio runtime: {e}"))?;
    rt.block_on(async {
        let (cancel_handle, cancel_signal) = create_cancel_channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                println!("🛑 Ctrl-C, cancelling");
                cancel_handle.cancel();
            }
        });

        let mut watchers: Vec<DetectorWatcher<AnyDetector>> = build_detectors(args)?
            .into_iter()
            .map(|detector| DetectorWatcher::new(detector, overlay.clone()))
            .collect();
        let mut refs: Vec<&mut dyn VisualWatcher> = watchers
            .iter_mut()
            .map(|w| w as &mut dyn VisualWatcher)
            .collect();

        println!(
            "▶️ Replaying {} frames from {} (timeout {}s)",
            source.len(),
            dir.display(),
            args.timeout_secs
        );
        let outcome = wait_until(
            &mut source,
            &mut refs,
            Duration::from_secs(args.timeout_secs),
            &cancel_signal,
        )
        .await
        .map_err(|e| e.to_string())?;
        println!("🏁 Outcome: {outcome}");

        if let screen_watch::WaitOutcome::Satisfied(i) = outcome {
            let watcher = &refs[i];
            let mut centers: Vec<NormalizedBox> =
                watcher.last_result().iter().map(|d| d.bbox).collect();
            sort_by_screen_side(&mut centers);
            println!("✅ {} fired with {} hit(s):", watcher.name(), centers.len());
            for bbox in &centers {
                let (cx, cy) = bbox.center();
                println!("   center=({:.3}, {:.3})", cx, cy);
            }
        }

        // Watchers clear their boxes when dropped, so render first.
        // Drawn on the last recorded frame.
        if let (Some(out), Some(last)) = (&args.overlay_path, source.frames().last()) {
            save_overlay(&overlay, last, out)?;
        }
        Ok::<(), String>(())
    })
}

fn save_overlay(overlay: &ImageOverlay, frame: &Frame, out: &Path) -> Result<(), String> {
    overlay
        .render(frame)
        .save(out)
        .map_err(|e| format!("Failed to write {}: {e}", out.display()))?;
    println!("💾 Overlay saved to {}", out.display());
    Ok(())
}

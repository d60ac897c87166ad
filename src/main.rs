//! Bug Squash entry point
//!
//! Handles platform-specific initialization and runs the detection loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, HtmlVideoElement};

    use bug_squash::audio::WebAudio;
    use bug_squash::platform::{self, HandTracker};
    use bug_squash::renderer::CanvasSurface;
    use bug_squash::{FrameDriver, GameError, Result, Settings};

    fn element<T: JsCast>(id: &str) -> Result<T> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<T>().ok())
            .ok_or_else(|| GameError::Surface(format!("missing #{}", id)))
    }

    async fn setup() -> Result<(HandTracker, FrameDriver<CanvasSurface, WebAudio>)> {
        let settings = Settings::load();
        let video: HtmlVideoElement = element("video")?;
        let canvas: HtmlCanvasElement = element("canvas")?;

        platform::set_status("Loading hand tracking model...");
        let tracker = HandTracker::load(&settings.model, video).await?;
        tracker.start_video().await?;

        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = tracker.frame_size();
        surface.resize(width, height);
        log::info!("Canvas size set to {}x{}", width, height);

        let audio = WebAudio::new(settings.effective_music_volume());
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Ok((tracker, FrameDriver::new(surface, audio, settings, seed)))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Bug Squash starting...");

        let (tracker, mut driver) = match setup().await {
            Ok(ready) => ready,
            Err(e) => {
                log::error!("{}", e);
                platform::set_status(&format!("Could not start: {}", e));
                return;
            }
        };

        platform::set_status("Ready - squash the bugs!");
        driver.start();
        log::info!("Bug Squash running!");

        wasm_bindgen_futures::spawn_local(async move {
            loop {
                let detections = tracker.detect().await;
                driver.on_detections(detections, platform::now_ms());
                if let Err(e) = platform::next_animation_frame().await {
                    log::error!("Frame scheduling stopped: {}", e);
                    break;
                }
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bug Squash (native) starting...");
    log::info!("Native mode has no camera - serve the web build for the real game");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a scripted run with a hand sweeping across the frame
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use bug_squash::audio::SilentAudio;
    use bug_squash::consts::NOMINAL_FRAME_MS;
    use bug_squash::detection::Detection;
    use bug_squash::renderer::RecordingSurface;
    use bug_squash::{FrameDriver, Settings};

    const WIDTH: f32 = 640.0;
    const HEIGHT: f32 = 480.0;
    const FRAMES: u32 = 60 * 60;

    let surface = RecordingSurface::new(WIDTH, HEIGHT);
    let mut driver = FrameDriver::new(surface, SilentAudio::new(), Settings::load(), 42);
    driver.start();

    for frame in 0..FRAMES {
        let now = frame as f64 * NOMINAL_FRAME_MS;
        let t = now as f32 / 1000.0;
        let x = (t * 0.9).sin() * 0.5 + 0.5;
        let y = (t * 1.3).cos() * 0.5 + 0.5;
        let hand = Detection::new(1, 0.9, [x * (WIDTH - 120.0), y * (HEIGHT - 120.0), 120.0, 120.0]);
        driver.on_detections(Ok(vec![hand]), now);
    }

    let state = driver.state();
    log::info!(
        "Headless run finished: {} caught, {} missed, phase {:?}, {} fps",
        state.score,
        state.missed,
        state.phase,
        driver.fps()
    );
}

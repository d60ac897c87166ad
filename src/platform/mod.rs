//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Frame scheduling
//! - The hand tracking model (handTrack.js on web)
//! - Page status text

#[cfg(target_arch = "wasm32")]
pub mod hand_track;

#[cfg(target_arch = "wasm32")]
pub use hand_track::HandTracker;

/// Milliseconds on a monotonic clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Resolve on the next `requestAnimationFrame`, yielding its timestamp
#[cfg(target_arch = "wasm32")]
pub async fn next_animation_frame() -> crate::Result<f64> {
    use crate::error::{GameError, js_message};

    let window = web_sys::window().ok_or_else(|| GameError::Surface("no window".into()))?;
    let mut schedule = |resolve: js_sys::Function, reject: js_sys::Function| {
        reject_on_error(window.request_animation_frame(&resolve), |e| {
            let _ = reject.call1(&wasm_bindgen::JsValue::NULL, &e);
        });
    };
    let promise = js_sys::Promise::new(&mut schedule);
    let time = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| GameError::Surface(js_message(&e)))?;
    Ok(time.as_f64().unwrap_or_else(now_ms))
}

/// Hand a failed frame request to `reject` so the pending promise settles
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn reject_on_error<T, E>(scheduled: std::result::Result<T, E>, reject: impl FnOnce(E)) {
    if let Err(e) = scheduled {
        reject(e);
    }
}

/// Write a message into the page's `#status` element, if it has one
#[cfg(target_arch = "wasm32")]
pub fn set_status(text: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("status"))
    {
        el.set_text_content(Some(text));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn test_failed_frame_request_rejects() {
        let mut rejected = None;
        reject_on_error::<i32, _>(Err("no window"), |e| rejected = Some(e));
        assert_eq!(rejected, Some("no window"));

        let mut called = false;
        reject_on_error::<i32, &str>(Ok(7), |_| called = true);
        assert!(!called);
    }
}

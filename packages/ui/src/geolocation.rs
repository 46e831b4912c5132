use store::Viewport;

/// The device position from the browser Geolocation API, if the user allows it.
#[cfg(target_arch = "wasm32")]
pub async fn current_position() -> Option<Viewport> {
    use js_sys::{Promise, Reflect};
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen::JsValue;

    let geolocation = web_sys::window()?.navigator().geolocation().ok()?;
    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let position = match JsFuture::from(promise).await {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!("Geolocation unavailable: {e:?}");
            return None;
        }
    };
    let coords = Reflect::get(&position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let long = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(Viewport::new(lat, long))
}

/// Native builds have no position source; the configured default stays.
#[cfg(not(target_arch = "wasm32"))]
pub async fn current_position() -> Option<Viewport> {
    None
}

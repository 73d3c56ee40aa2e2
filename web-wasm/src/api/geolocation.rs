//! 端末の位置情報（navigator.geolocation）

use futures::channel::oneshot;
use opportunity_common::location::{GEOLOCATION_HIGH_ACCURACY, GEOLOCATION_TIMEOUT_MS};
use opportunity_common::{Coordinates, LocationError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::PositionOptions;

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, LocationError>>>>>;

fn number_prop(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

fn position_to_coords(position: &JsValue) -> Result<Coordinates, LocationError> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| LocationError::Unavailable(String::new()))?;
    let lat = number_prop(&coords, "latitude");
    let lng = number_prop(&coords, "longitude");

    lat.zip(lng)
        .and_then(|(lat, lng)| Coordinates::new(lat, lng))
        .ok_or_else(|| LocationError::Unavailable(String::new()))
}

fn position_error(error: &JsValue) -> LocationError {
    let code = number_prop(error, "code").unwrap_or(0.0) as u16;
    let message = js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    LocationError::from_geolocation_code(code, &message)
}

fn send(reply: &Reply, result: Result<Coordinates, LocationError>) {
    if let Some(sender) = reply.borrow_mut().take() {
        let _ = sender.send(result);
    }
}

/// undefined・null は未対応
fn as_geolocation(raw: JsValue) -> Result<web_sys::Geolocation, LocationError> {
    if raw.is_undefined() || raw.is_null() {
        return Err(LocationError::Unsupported);
    }
    raw.dyn_into::<web_sys::Geolocation>()
        .map_err(|_| LocationError::Unsupported)
}

/// 未対応のブラウザでは getter が例外ではなく undefined を返すので先に確認する
fn supported_geolocation() -> Result<web_sys::Geolocation, LocationError> {
    let navigator = web_sys::window()
        .ok_or(LocationError::Unsupported)?
        .navigator();
    let raw = js_sys::Reflect::get(&navigator, &JsValue::from_str("geolocation"))
        .map_err(|_| LocationError::Unsupported)?;
    as_geolocation(raw)
}

/// 現在地を1回だけ取得（高精度・15秒タイムアウト）
pub async fn current_position() -> Result<Coordinates, LocationError> {
    let geolocation = supported_geolocation()?;

    let (sender, receiver) = oneshot::channel();
    let reply: Reply = Rc::new(RefCell::new(Some(sender)));

    let on_success = {
        let reply = reply.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
            send(&reply, position_to_coords(&position));
        })
    };
    let on_error = {
        let reply = reply.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
            send(&reply, Err(position_error(&error)));
        })
    };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(GEOLOCATION_HIGH_ACCURACY);
    options.set_timeout(GEOLOCATION_TIMEOUT_MS);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|e| LocationError::Unavailable(super::js_error_message(&e)))?;

    // コールバックは応答が来るまで保持する
    let result = receiver
        .await
        .unwrap_or_else(|_| Err(LocationError::Unavailable(String::new())));
    drop(on_success);
    drop(on_error);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_common::location::GEOLOCATION_UNSUPPORTED_MESSAGE;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_position_error_codes() {
        let error = js_sys::Object::new();
        js_sys::Reflect::set(&error, &"code".into(), &JsValue::from_f64(1.0)).unwrap();
        js_sys::Reflect::set(&error, &"message".into(), &"User denied Geolocation".into()).unwrap();
        assert_eq!(
            position_error(&error),
            LocationError::PermissionDenied("User denied Geolocation".into())
        );
    }

    #[wasm_bindgen_test]
    fn test_position_to_coords() {
        let coords = js_sys::Object::new();
        js_sys::Reflect::set(&coords, &"latitude".into(), &JsValue::from_f64(42.28)).unwrap();
        js_sys::Reflect::set(&coords, &"longitude".into(), &JsValue::from_f64(-83.74)).unwrap();
        let position = js_sys::Object::new();
        js_sys::Reflect::set(&position, &"coords".into(), &coords).unwrap();

        assert_eq!(position_to_coords(&position), Ok(Coordinates { lat: 42.28, lng: -83.74 }));
    }

    #[wasm_bindgen_test]
    fn test_missing_geolocation_is_unsupported() {
        for raw in [JsValue::UNDEFINED, JsValue::NULL] {
            let err = as_geolocation(raw).unwrap_err();
            assert_eq!(err, LocationError::Unsupported);
            assert_eq!(err.user_message(), GEOLOCATION_UNSUPPORTED_MESSAGE);
        }
    }
}

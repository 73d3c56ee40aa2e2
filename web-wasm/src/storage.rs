//! localStorage によるキー・バリューストア

use gloo::storage::{LocalStorage, Storage};
use opportunity_common::location::LocationStore;
use opportunity_common::{KeyValueStore, LocationKeys};
use wasm_bindgen::JsValue;

/// 値は加工せずそのまま保存する
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    type Error = JsValue;

    fn get(&self, key: &str) -> Result<Option<String>, JsValue> {
        LocalStorage::raw().get_item(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        LocalStorage::raw().set_item(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), JsValue> {
        LocalStorage::raw().remove_item(key)
    }
}

pub fn location_store() -> LocationStore<LocalStore> {
    LocationStore::new(LocalStore, LocationKeys::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opportunity_common::{Coordinates, UserLocation};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_location_round_trip() {
        let mut store = location_store();
        let location = UserLocation {
            coords: Coordinates { lat: 30.2672, lng: -97.7431 },
            label: "Austin, TX".into(),
        };

        store.save(&location).unwrap();
        assert_eq!(store.load().unwrap(), Some(location));
        assert_eq!(
            LocalStore.get("yc_user_label").unwrap().as_deref(),
            Some("Austin, TX")
        );

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}

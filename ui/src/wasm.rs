//! The browser entry point. The page owns the map; this hands it prepared layers and panel
//! contents, and takes user input back.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsError;
use wasm_bindgen_futures::future_to_promise;

use model::{FilterState, WeatherFilter};

use crate::file_loader::DataSource;
use crate::filters;
use crate::viewer::{LoadStatus, Viewer};

#[wasm_bindgen(start)]
pub fn run_wasm() {
    crate::logger::setup();
}

/// Shared with in-flight fetches, which finish after the call that started them returns
#[wasm_bindgen]
pub struct TripViewer {
    viewer: Rc<RefCell<Viewer>>,
}

#[wasm_bindgen]
impl TripViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TripViewer {
        TripViewer {
            viewer: Rc::new(RefCell::new(Viewer::new(DataSource::Embedded))),
        }
    }

    #[wasm_bindgen(js_name = loadEmbedded)]
    pub fn load_embedded(&self) {
        let mut viewer = self.viewer.borrow_mut();
        viewer.set_source(DataSource::Embedded);
        viewer.load();
    }

    #[wasm_bindgen(js_name = loadText)]
    pub fn load_text(&self, text: String) {
        let mut viewer = self.viewer.borrow_mut();
        let generation = viewer.begin_load();
        viewer.finish_load(generation, Ok(text.into_bytes()));
    }

    /// Resolves once the fetch and parse are done, successfully or not
    #[wasm_bindgen(js_name = loadUrl)]
    pub fn load_url(&self, url: String) -> Promise {
        self.viewer.borrow_mut().set_source(DataSource::Url(url));
        self.reload()
    }

    /// Loads the current source again from scratch, using the current sampling rate
    pub fn reload(&self) -> Promise {
        // Each call captures its own source and generation before anything is spawned
        let (generation, source) = {
            let mut viewer = self.viewer.borrow_mut();
            (viewer.begin_load(), viewer.source().clone())
        };
        let viewer = self.viewer.clone();
        future_to_promise(async move {
            let data = source.fetch().await;
            viewer.borrow_mut().finish_load(generation, data);
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Resolves to false if there was nothing to retry
    pub fn retry(&self) -> Promise {
        if self.viewer.borrow().error().is_none() {
            return Promise::resolve(&JsValue::FALSE);
        }
        let reload = self.reload();
        future_to_promise(async move {
            wasm_bindgen_futures::JsFuture::from(reload).await?;
            Ok(JsValue::TRUE)
        })
    }

    #[wasm_bindgen(js_name = toggleStatistics)]
    pub fn toggle_statistics(&self) {
        self.viewer.borrow_mut().toggle_statistics();
    }

    /// Raw text from the inputs; unusable values fall back to the defaults
    #[wasm_bindgen(js_name = setSpeedRange)]
    pub fn set_speed_range(&self, min: &str, max: &str) {
        let mut viewer = self.viewer.borrow_mut();
        let filters = FilterState {
            speed_min: filters::speed_min(min),
            speed_max: filters::speed_max(max),
            weather: viewer.filters.weather.clone(),
        };
        viewer.set_filters(filters);
    }

    #[wasm_bindgen(js_name = setWeather)]
    pub fn set_weather(&self, weather: &str) {
        let mut viewer = self.viewer.borrow_mut();
        let mut filters = viewer.filters.clone();
        filters.weather = WeatherFilter::parse(weather);
        viewer.set_filters(filters);
    }

    /// Takes effect on the next reload
    #[wasm_bindgen(js_name = setSamplingRate)]
    pub fn set_sampling_rate(&self, raw: &str) {
        self.viewer
            .borrow_mut()
            .set_sampling_rate(filters::sampling_rate(raw));
    }

    /// "idle", "loading", "ready", or "error"
    pub fn status(&self) -> String {
        match self.viewer.borrow().status() {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Ready => "ready",
            LoadStatus::Error(_) => "error",
        }
        .to_string()
    }

    pub fn error(&self) -> Option<String> {
        self.viewer.borrow().error().map(|x| x.to_string())
    }

    /// Null until data is ready
    pub fn layers(&self) -> Result<JsValue, JsError> {
        match self.viewer.borrow().layers() {
            Some(layers) => {
                serde_wasm_bindgen::to_value(&layers).map_err(|e| JsError::new(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }

    pub fn panel(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.viewer.borrow().panel())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = toGeoJson)]
    pub fn to_geojson(&self) -> Result<Option<String>, JsError> {
        match self.viewer.borrow().layers() {
            Some(layers) => layers
                .to_geojson_string()
                .map(Some)
                .map_err(|e| JsError::new(&e.to_string())),
            None => Ok(None),
        }
    }
}

impl Default for TripViewer {
    fn default() -> Self {
        Self::new()
    }
}

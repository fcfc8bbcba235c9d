use std::fmt;

use model::LoadError;

/// A small pre-sampled dataset compiled into the viewer, so there's always something to show
pub const EMBEDDED_CSV: &str = include_str!("../data/sample_trips.csv");

#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    Embedded,
    /// Only readable on native
    File(String),
    /// Only fetchable from the browser
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataSource::Embedded => write!(f, "Embedded sample data"),
            DataSource::File(path) => write!(f, "File {path}"),
            DataSource::Url(url) => write!(f, "{url}"),
        }
    }
}

impl DataSource {
    /// Reads the raw CSV bytes. Decoding them is up to the parser. URLs need the async `fetch`.
    pub fn read(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::Embedded => Ok(EMBEDDED_CSV.as_bytes().to_vec()),
            DataSource::File(path) => {
                fs_err::read(path).map_err(|err| LoadError::FetchFailure(err.to_string()))
            }
            DataSource::Url(url) => Err(LoadError::FetchFailure(format!(
                "{url} can only be fetched from the browser"
            ))),
        }
    }

    #[cfg(feature = "wasm")]
    pub async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::Url(url) => fetch_url(url).await,
            _ => self.read(),
        }
    }
}

#[cfg(feature = "wasm")]
async fn fetch_url(url: &str) -> Result<Vec<u8>, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let describe = |err: wasm_bindgen::JsValue| {
        LoadError::FetchFailure(
            err.as_string()
                .or_else(|| {
                    err.dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                })
                .unwrap_or_else(|| format!("{:?}", err)),
        )
    };

    let window =
        web_sys::window().ok_or_else(|| LoadError::FetchFailure("no window".to_string()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(describe)?;
    let resp: web_sys::Response = resp.dyn_into().map_err(describe)?;
    if !resp.ok() {
        return Err(LoadError::FetchFailure(format!(
            "HTTP error! status: {}",
            resp.status()
        )));
    }
    let buffer = JsFuture::from(resp.array_buffer().map_err(describe)?)
        .await
        .map_err(describe)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

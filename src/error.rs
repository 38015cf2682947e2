// Failures in the browser glue. None of these reach the user; they are logged
// and the logo degrades to a blank canvas.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    NoWindow,
    NoDocument,
    NoCanvas,             // Node ref not attached to a <canvas>
    NoContext,            // getContext("2d") returned nothing
    ImageLoad(String),    // <img> fired onerror
    ImageData(String),    // Offscreen draw or getImageData failed (e.g. tainted canvas)
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoWindow => write!(f, "no global window"),
            Error::NoDocument => write!(f, "window has no document"),
            Error::NoCanvas => write!(f, "canvas element not mounted"),
            Error::NoContext => write!(f, "2d context unavailable"),
            Error::ImageLoad(s) => write!(f, "image load error: {s}"),
            Error::ImageData(s) => write!(f, "image sampling error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        Error::ImageData(format!("{v:?}"))
    }
}

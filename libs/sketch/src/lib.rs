//! Drawing surface for freehand digits
//!
//! Pointer gestures go into a [`StrokeCapture`], which rasterizes them into an
//! owned RGBA buffer. The buffer is exported on demand as a PNG data URI, the
//! same format a browser canvas produces with `toDataURL()`.

mod encoder;
mod raster;
mod stroke;

pub use encoder::{decode_data_uri, encode, PNG_DATA_URI_PREFIX};
pub use raster::Raster;
pub use stroke::{PenState, StrokeCapture, PRIMARY_BUTTON};

//! Brings the extension traits into scope, `use roadway::prelude::*;`.

pub use crate::ext::RequestExt;

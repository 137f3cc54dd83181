//! URL 拆解与重建
mod param_map;
mod url_parts;

pub use param_map::ParamMap;
pub use url_parts::{Fragment, UrlParts};

//! Request construction - forms, header blocks and built requests

pub mod builder;
pub mod headers;

pub use builder::{build, BuiltRequest, RequestForm};
pub use headers::{parse_header_block, render_header_block};

#[macro_use]
pub mod macros;

pub mod api;
pub mod colour;
pub mod fs_json_util;
pub mod palette;
pub mod parser;

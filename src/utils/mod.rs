pub mod date;
pub mod html;
pub mod log;
pub mod minify;

pub mod config;
pub mod model;
pub mod parse_error;
pub mod plugin;
pub mod rate_limit;
pub mod source;
pub mod util;
pub use reqwest::Url;

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

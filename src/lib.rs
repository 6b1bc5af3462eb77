pub mod config;
pub mod model;
pub mod play;
pub mod traits;
pub mod util;

#[cfg(test)]
mod test_utils;

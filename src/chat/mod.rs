pub mod config;
pub mod normalize;
pub mod paths;
pub mod session;
pub mod transcript;
pub mod transport;
pub mod util;

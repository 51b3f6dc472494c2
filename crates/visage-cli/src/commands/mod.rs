pub mod config;
pub mod enroll;
pub mod recognize;
pub mod status;

pub use config::{init_config, show_config};
pub use enroll::run_enroll;
pub use recognize::run_recognize;
pub use status::show_status;

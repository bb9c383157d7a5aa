
pub use test_app::*;

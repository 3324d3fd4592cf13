pub mod logging;
pub mod request_id;
pub mod validate;

pub use logging::*;
pub use request_id::*;
pub use validate::*;

pub mod memory;
pub mod repository;

pub use memory::*;
pub use repository::*;

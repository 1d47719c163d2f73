pub mod board;
pub mod config;
pub mod filters;
pub mod item;

pub use board::*;
pub use config::*;
pub use filters::*;
pub use item::*;

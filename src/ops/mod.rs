pub mod board_ops;
pub mod classify;
pub mod filter_ops;
pub mod refresh;

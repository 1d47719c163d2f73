pub mod board_io;
pub mod config_io;
pub mod items_io;
pub mod state;

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod query;

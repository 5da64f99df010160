mod postgres_db_handler;
mod scripted_db_handler;

pub use postgres_db_handler::*;
pub use scripted_db_handler::*;

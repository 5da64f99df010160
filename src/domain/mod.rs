mod db_handler;
mod error;
mod lookup;
mod member;
mod member_id;

pub use db_handler::*;
pub use error::*;
pub use lookup::*;
pub use member::*;
pub use member_id::*;

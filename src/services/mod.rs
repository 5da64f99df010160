pub mod db_handlers;
pub mod member_repository;

pub use member_repository::MemberRepository;

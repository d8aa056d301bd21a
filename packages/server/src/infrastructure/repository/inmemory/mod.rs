//! インメモリ実装

pub mod group;
pub mod message;

pub use group::InMemoryGroupRepository;
pub use message::InMemoryMessageRepository;

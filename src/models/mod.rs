pub mod channel;
pub mod group;

// NAT gateway v2

pub mod models;
pub mod proxy;

pub use proxy::NatProxy;

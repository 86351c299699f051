// Dedicated load balancer v3

pub mod models;
pub mod proxy;

pub use proxy::VlbProxy;

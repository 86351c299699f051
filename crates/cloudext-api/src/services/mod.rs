// Service descriptors, resources and typed proxies

pub mod apig;
pub mod modelarts;
pub mod nat;
pub mod vlb;

// API Gateway v2 (dedicated gateways)

mod acls;
mod apis;
mod gateways;
pub mod models;
pub mod proxy;
mod signatures;
mod throttling;

pub use proxy::ApigProxy;

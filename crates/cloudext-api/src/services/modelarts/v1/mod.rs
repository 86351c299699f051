// ModelArts v1 training jobs

pub mod models;
pub mod proxy;

pub use proxy::ModelArtsV1Proxy;

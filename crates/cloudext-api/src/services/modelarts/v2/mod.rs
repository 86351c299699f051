// ModelArts v2 training jobs

pub mod models;
pub mod proxy;

pub use proxy::ModelArtsV2Proxy;

pub mod http_provider;
pub mod local_provider;
pub mod util;

pub use http_provider::HttpProvider;
pub use local_provider::LocalProvider;

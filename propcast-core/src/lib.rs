pub mod error;
pub mod placeholder;
pub mod properties;
pub mod resolver;
pub mod source;
pub mod value;

// Re-export key types/traits for easier use
pub use error::{PropcastError, PropcastResult};
pub use placeholder::Placeholder;
pub use properties::PropertiesSource;
pub use resolver::ConfigResolver;
pub use source::{ArgsSource, ConfigSource, EnvSource, MapSource};
pub use value::ResolvedValue;

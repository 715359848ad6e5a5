mod default;
pub use default::DefaultCredentialProvider;

mod edgerc;
pub use edgerc::EdgercCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod static_;
pub use static_::StaticCredentialProvider;

//! Environment lookup used for configuration and per-record metadata

use std::collections::HashMap;

/// Log level name, e.g. `DEBUG`
pub const LAMBDA_ENV_LOG_LEVEL: &str = "AWS_LAMBDA_LOG_LEVEL";

/// Log format name, `JSON` or `Text`
pub const LAMBDA_ENV_LOG_FORMAT: &str = "AWS_LAMBDA_LOG_FORMAT";

/// Name of the running function
pub const LAMBDA_ENV_FUNCTION_NAME: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Version of the running function, e.g. `$LATEST`
pub const LAMBDA_ENV_FUNCTION_VERSION: &str = "AWS_LAMBDA_FUNCTION_VERSION";

/// Source of environment variables.
///
/// Handlers read their construction defaults and per-record metadata through
/// this trait rather than `std::env` directly, so tests can supply a map.
pub trait EnvLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

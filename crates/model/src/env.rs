/// Environment variable controlling log verbosity, read once at startup
pub const LOG_LEVEL: &'static str = "LOG_LEVEL";

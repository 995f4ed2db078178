pub mod channel_config;
pub mod error_response;
pub mod user_profile;

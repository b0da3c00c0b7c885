pub mod api;
pub mod cli;
pub mod core;
pub mod mailer;
pub mod oauth;
pub mod otp;

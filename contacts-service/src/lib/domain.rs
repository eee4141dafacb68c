pub mod access_token;
pub mod contact;
pub mod user;

pub mod activity;
pub mod call;
pub mod create;
pub mod home;
pub mod logger;
pub mod login;
pub mod profile;
pub mod search;

pub mod activity;
pub mod app_state;
pub mod call;
pub mod composer;
pub mod domain;
pub mod feed;
pub mod load;
pub mod login;
pub mod messages;
pub mod post_card;
pub mod profile;
pub mod screen;
pub mod search;

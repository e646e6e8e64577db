pub mod alert;
pub mod bottom_nav;
pub mod post_card;

pub mod auction_types;
pub mod auth_types;
pub mod award_types;
pub mod event_types;
pub mod template_types;

pub mod jwt;
pub mod responses;

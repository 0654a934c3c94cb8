pub mod auth;
pub mod external;
pub mod me;

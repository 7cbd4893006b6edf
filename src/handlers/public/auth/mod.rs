pub mod login;
pub mod register;

// Re-export handler functions for use in routing
pub use login::post as session_login;
pub use register::post as user_register;

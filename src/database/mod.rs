pub mod manager;
pub mod menus;
pub mod models;
pub mod users;

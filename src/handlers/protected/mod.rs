pub mod menus;

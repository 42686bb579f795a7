pub mod favorites;
pub mod help;
pub mod root;
pub mod search;
pub mod sidebar;

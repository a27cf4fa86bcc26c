pub mod admins;
pub mod common;
pub mod orders;
pub mod pagination;
pub mod projects;
pub mod settings;
pub mod stats;
pub mod uploads;
pub mod translations;

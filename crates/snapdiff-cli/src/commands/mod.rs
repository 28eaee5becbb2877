pub mod capture;
pub mod diff;
pub mod list;
pub mod show;

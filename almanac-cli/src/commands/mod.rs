pub mod delete;
pub mod list;
pub mod nav;
pub mod new;
pub mod show;

pub mod auth;
pub mod bug;
pub mod dispatch;
pub mod project;
pub mod report;
pub mod shared;
pub mod sprint;
pub mod task;
pub mod user;

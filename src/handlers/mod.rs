pub mod dashboard;
pub mod entries;
pub mod health;
pub mod insights;
pub mod session;
pub mod settings;

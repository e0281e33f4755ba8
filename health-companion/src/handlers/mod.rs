pub mod app;
pub mod food;
pub mod insights;
pub mod meal_plan;
pub mod profile;
pub mod views;

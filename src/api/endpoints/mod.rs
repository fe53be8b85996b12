pub mod analytics;
pub mod facility;
pub mod feedback;
pub mod health;

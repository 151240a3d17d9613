pub mod health;
pub mod sitemap;

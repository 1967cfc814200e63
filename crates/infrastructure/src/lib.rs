pub mod auth;
pub mod database;
pub mod repositories;

#[cfg(test)]
mod tests;

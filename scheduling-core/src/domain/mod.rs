pub mod entities;
pub mod notes;
pub mod repositories;
pub mod rules;
pub mod services;
pub mod state;

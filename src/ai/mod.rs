pub mod difficulty;
pub mod rules;
pub mod search;
pub mod strategy;

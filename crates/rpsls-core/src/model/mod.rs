pub mod history;
pub mod moves;
pub mod ruleset;
pub mod score;

//! Foodora Domain Concerns

pub mod orders;

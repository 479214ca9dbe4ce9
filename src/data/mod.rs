pub mod hf;
pub mod traces;

pub mod catalog;
pub mod llm;
pub mod practice;

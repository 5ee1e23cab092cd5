pub mod auth;
pub mod learner;
pub mod lessons;
pub mod practice;
pub mod progress;
pub mod tutor;

pub mod application;
pub mod catalog;
pub mod domain;
pub mod interfaces;

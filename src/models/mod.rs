pub mod catalog;
pub mod employee;
pub mod view;

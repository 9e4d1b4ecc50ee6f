pub mod echo;
pub mod form;
pub mod health;
pub mod items;
pub mod submit;

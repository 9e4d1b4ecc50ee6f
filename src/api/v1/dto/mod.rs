pub mod items;
pub mod submit;

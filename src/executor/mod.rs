pub mod input;
pub mod resolver;

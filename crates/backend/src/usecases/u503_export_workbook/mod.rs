pub mod executor;
pub mod template;

pub mod tool_handler;

pub use tool_handler::*;

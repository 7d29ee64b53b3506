// src/web/handlers/mod.rs
pub mod ai_handlers;
pub mod export_handlers;
pub mod resume_handlers;
pub mod system_handlers;

pub use ai_handlers::*;
pub use export_handlers::*;
pub use resume_handlers::*;
pub use system_handlers::*;

mod handlers;
mod render;

pub use handlers::handle_key_event;
pub use render::run_app;

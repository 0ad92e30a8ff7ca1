pub mod users_handler;

pub use users_handler::AppState;

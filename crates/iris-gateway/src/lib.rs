pub mod auth;
pub mod server;
pub mod types;

pub use auth::AuthConfig;
pub use server::{create_router, reply_to_frame, start_server, AppState};
pub use types::{ClientFrame, MethodReply, ServerFrame};

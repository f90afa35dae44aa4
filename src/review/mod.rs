pub mod command;
pub mod reviewer;
pub mod session;

pub use command::Command;
pub use reviewer::{CodeReviewer, NO_FILES_MESSAGE};
pub use session::Session;

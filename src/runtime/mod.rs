//! Session-driven execution of Botscript bots

mod interpreter;
mod session;
mod template;

pub use interpreter::Interpreter;
pub use session::{SessionPhase, SessionState};
pub use template::render_template;

//! Command-line interface module
//!
//! Argument definitions plus one handler per subcommand. Handlers return
//! `anyhow::Result`; library errors keep their [`PyexError`] type inside so
//! [`report_error`] can render them with a hint.

pub mod args;
pub mod feedback;
pub mod generate;
pub mod init;
pub mod session;
pub mod topics;
pub mod ui;

pub use args::*;
pub use feedback::handle_feedback_command;
pub use generate::handle_generate_command;
pub use init::handle_init_command;
pub use session::handle_session_command;
pub use topics::handle_topics_command;

use console::style;
use pyex_core::PyexError;

/// Print `err` as a readable message on stderr. No backtraces.
pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<PyexError>() {
        Some(pyex) => eprintln!("{} {}", style("error:").red().bold(), pyex.user_message()),
        None => eprintln!("{} {err:#}", style("error:").red().bold()),
    }
}

pub mod render;
pub mod session;

pub use render::{render_failure, render_markdown, render_outcome};
pub use session::{check_once, run_session, SessionSummary};

mod ui;

pub use ui::{Display, print_summary, render_progress, render_summary};

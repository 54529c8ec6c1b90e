use std::str::FromStr;
use tracing::Level;

/// Level from `MARKS_LOG` at build time, `info` when unset or unparsable
fn log_level() -> Level {
    option_env!("MARKS_LOG")
        .and_then(|raw| Level::from_str(raw).ok())
        .unwrap_or(Level::INFO)
}

fn main() {
    if let Err(e) = dioxus::logger::init(log_level()) {
        eprintln!("Logger already installed: {e}");
    }
    dioxus::launch(marks_web::App);
}

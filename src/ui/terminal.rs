use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen, restored again on panic
pub fn init() -> Result<Tui> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

pub fn install_panic_hook() {
    chain_panic_hook(|| {
        let _ = restore();
    });
}

/// Run `cleanup` first, then whatever hook was installed before (the
/// human-panic report).
pub fn chain_panic_hook<F>(cleanup: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        cleanup();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_panic_runs_cleanup_before_previous_hook() {
        let cleaned = Arc::new(AtomicBool::new(false));
        let reported = Arc::new(AtomicBool::new(false));

        let reported_hook = reported.clone();
        let cleaned_seen = cleaned.clone();
        std::panic::set_hook(Box::new(move |_| {
            // The previous hook sees the cleanup already done
            reported_hook.store(cleaned_seen.load(Ordering::SeqCst), Ordering::SeqCst);
        }));

        let flag = cleaned.clone();
        chain_panic_hook(move || flag.store(true, Ordering::SeqCst));

        let result = std::panic::catch_unwind(|| panic!("render blew up"));
        let _ = std::panic::take_hook();

        assert!(result.is_err());
        assert!(cleaned.load(Ordering::SeqCst));
        assert!(reported.load(Ordering::SeqCst));
    }
}

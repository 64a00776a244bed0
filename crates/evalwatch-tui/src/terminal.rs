//! Terminal setup and restoration

use evalwatch_core::prelude::*;
use ratatui::DefaultTerminal;

/// Enter raw mode and the alternate screen.
///
/// A panic anywhere after this point restores the terminal before the
/// previous hook prints its report.
pub fn init() -> Result<DefaultTerminal> {
    install_panic_hook();
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

/// Leave the alternate screen and raw mode
pub fn restore() {
    ratatui::restore();
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

//! Terminal setup and restoration

/// Install a panic hook that restores the terminal before reporting
///
/// Must run after `color_eyre::install()` so the eyre report is chained.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        tracing::error!("Panic: {}", panic_info);
        original_hook(panic_info);
    }));
}

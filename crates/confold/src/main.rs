//! Main entry point for confold
//!
//! This binary supports both CLI and GUI modes:
//! - CLI mode: when any argument is given
//! - GUI mode: when started bare
//!
//! The window owns its own tokio runtime, so one is only built here for the CLI.

use anyhow::Result;

fn main() -> Result<()> {
    if confold_cli::should_run_cli_mode() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        if let Err(e) = runtime.block_on(confold_cli::run()) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    } else if let Err(e) = confold_gui::run() {
        eprintln!("GUI error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

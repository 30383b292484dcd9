// Interactive classification UI
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use tokio::runtime::Handle;

use self::terminal::TerminalManager;
use crate::client::ClassifierClient;

/// Run the interactive TUI; requests are spawned on `runtime`
pub fn run_interactive(client: ClassifierClient, runtime: Handle) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(client, runtime);

    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}

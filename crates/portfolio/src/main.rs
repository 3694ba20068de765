mod content;
mod startup;
mod theme;
mod ui;
mod utils;
mod viewer;

use bevy::app::AppExit;

fn main() -> anyhow::Result<()> {
    let mut app = startup::init().map_err(|err| anyhow::anyhow!(err))?;

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("portfolio exited with code {code}"),
    }
}

use anyhow::Result;

mod app;
mod logging;

use batch_rename::cli;

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}

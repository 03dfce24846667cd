use anyhow::Result;
use krew_manifest::cli::{App, Args};

fn main() -> Result<()> {
    let args = Args::parse_args();
    let mut app = App::load(args.config.clone())?;

    app.run(args)
}

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = loop_gallery::config::Config::parse();
    loop_gallery::app::init_logging(&cfg)?;
    loop_gallery::app::run(cfg)
}

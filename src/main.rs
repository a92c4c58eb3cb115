use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = tui_intro::config::Config::parse();
    if cfg.list_devices {
        tui_intro::audio::list_input_devices()?;
        return Ok(());
    }

    tui_intro::app::run(cfg)
}

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = wavy_sandbox::config::Config::parse();
    if cfg.list_filters {
        for (i, f) in wavy_sandbox::filters::list_filters().iter().enumerate() {
            println!("{:>2}. {}", i, f.name());
        }
        return Ok(());
    }

    wavy_sandbox::app::run(cfg)
}

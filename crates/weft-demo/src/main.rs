use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use weft_config::WeftConfig;

mod paint;
mod scenes;
use scenes::{Scenario, list::ListScene, virtual_list::VirtualListScene};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_filter(filter))
        .init();
}

fn select(name: Option<&str>) -> Result<Vec<Box<dyn Scenario>>> {
    Ok(match name {
        None => vec![Box::new(ListScene::default()), Box::new(VirtualListScene::default())],
        Some("list") => vec![Box::new(ListScene::default())],
        Some("virtual") | Some("virtual-list") => vec![Box::new(VirtualListScene::default())],
        Some(other) => bail!("unknown scenario {other:?} (expected list or virtual)"),
    })
}

fn main() -> Result<()> {
    init_tracing();

    let config = WeftConfig::load();
    // --scenario=<name> wins over weft.toml and WEFT_DEMO_SCENARIO
    let requested = std::env::args()
        .find_map(|a| a.strip_prefix("--scenario=").map(str::to_string))
        .or_else(|| config.demo.scenario.clone());

    for mut scenario in select(requested.as_deref())? {
        let name = scenario.name();
        let rendered = scenes::run(scenario.as_mut(), &config)
            .with_context(|| format!("scenario {name} failed"))?;
        tracing::info!(scenario = name, rendered, frames = config.demo.frames, "scenario finished");
    }
    Ok(())
}

//! Loads the distribution of a species into a headless map, selects its first country and prints
//! the resulting layers and details panel.
//!
//! ```sh
//! cargo run --example distribution_map -- green-sea-turtle
//! ```

use env_logger::Env;
use turterra::catalog::CmsClient;
use turterra::control::MapEvent;
use turterra::data_provider::{HttpLoader, UrlMapDataProvider};
use turterra::engine::{MapEngine, MemoryEngine};
use turterra::{DummyMessenger, HighlightController, MapConfig, MapError};

#[tokio::main]
async fn main() -> Result<(), MapError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let species = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "green-sea-turtle".to_string());

    let config = MapConfig::default();
    let loader = HttpLoader::new()?;
    let record = CmsClient::new(loader.clone(), &config)
        .load_species_record(&species)
        .await?;

    let mut engine = MemoryEngine::new(config.default_view(), config.viewport());
    engine.set_messenger(Box::new(DummyMessenger));

    let controller = HighlightController::new(
        engine,
        UrlMapDataProvider::new(loader, &config),
        config,
    );
    controller.load_species(&record).await;

    let countries = controller.country_list();
    println!("{} is found in {} countries", species, countries.len());

    if let Some((slug, _)) = countries.first() {
        controller
            .handle_event(MapEvent::RegionListClicked(slug.clone()))
            .await;
        controller.handle_event(MapEvent::PanelTransitionEnd).await;
    }

    controller.with_engine(|engine| {
        for id in engine.layer_ids() {
            println!("layer {id}");
        }
        let view = engine.view();
        println!(
            "camera at {:.2}, {:.2}, zoom {:.1}",
            view.lon(),
            view.lat(),
            view.zoom()
        );
    });

    if let Some(details) = controller.details() {
        println!("{}: {} ({})", details.name, details.presence, details.origin);
        println!("{}", details.description);
        for sub_region in &details.sub_regions {
            println!("  - {sub_region}");
        }
    }

    Ok(())
}

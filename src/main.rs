use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use opportunity_common::csv_export::NOTHING_TO_EXPORT_MESSAGE;
use opportunity_common::location::LocationStore;
use opportunity_common::{Action, Coordinates, ListingStore, LoadStatus, UserLocation, ViewState};
use opportunity_finder::{cli, config, display, error, export, geocode, source, store};
use cli::{Cli, Commands, LocationCommand, ViewArgs};
use config::Config;
use error::{FinderError, Result};
use std::time::Duration;
use store::FileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug,opportunity_finder=debug,reqwest=info,hyper=info"
    } else {
        "warn,opportunity_finder=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_location_store(config: &Config) -> Result<LocationStore<FileStore>> {
    let path = Config::location_path()?;
    Ok(LocationStore::new(FileStore::open(&path), config.location_keys()))
}

/// 一覧を読み込み、保存済みの現在地を反映した画面状態を作る
async fn load_view(config: &Config, view: &ViewArgs) -> Result<(ListingStore, ViewState)> {
    let source = source::Source::resolve(config, view.input.as_deref())?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("一覧を取得中...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = source::fetch_opportunities(&source, config).await;
    spinner.finish_and_clear();

    let listing = ListingStore::from_result(result);
    if let LoadStatus::Failed(message) = listing.status() {
        return Err(FinderError::Fetch(message.clone()));
    }

    let mut state = ViewState::default();
    match open_location_store(config)?.load() {
        Ok(Some(location)) => state = state.apply(Action::LocationRestored(location)),
        Ok(None) => {}
        Err(e) => tracing::warn!("現在地の読み込みに失敗: {}", e),
    }

    Ok((listing, view.view_state(state)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::List { view } => {
            let (listing, state) = load_view(&config, &view).await?;
            let visible = state.visible(listing.records());

            println!("{}", display::format_header(&state));
            for opp in &visible {
                println!("{}", display::format_row(opp, &state));
            }

            println!(
                "\n{}件中 {}件を表示 / お気に入り {}件",
                listing.len(),
                visible.len(),
                state.favorites.count()
            );
            if let Some(location) = &state.user_location {
                println!("現在地: {}", location.label);
            }
        }

        Commands::Export { view, output } => {
            let (listing, state) = load_view(&config, &view).await?;

            match state.export_csv(listing.records())? {
                None => println!("{}", NOTHING_TO_EXPORT_MESSAGE),
                Some(file) => {
                    let output = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                    let path = export::write_csv(&file, &output)?;
                    tracing::info!(rows = file.row_count, "CSVを出力しました");
                    println!("✔ {}件を出力: {}", file.row_count, path.display());
                }
            }
        }

        Commands::Location { action } => {
            let mut store = open_location_store(&config)?;

            match action {
                LocationCommand::Set { address, lat, lng, label } => {
                    let location = match (lat, lng) {
                        (Some(lat), Some(lng)) => {
                            let coords = Coordinates::new(lat, lng).ok_or_else(|| {
                                FinderError::Config(format!("不正な座標: {}, {}", lat, lng))
                            })?;
                            UserLocation {
                                coords,
                                label: label.unwrap_or_else(|| "Custom location".into()),
                            }
                        }
                        _ => {
                            let query = match address {
                                Some(address) => address,
                                None => Input::<String>::new()
                                    .with_prompt("ZIP or City, State (e.g., 48104 or Austin, TX)")
                                    .with_initial_text(store.saved_label()?)
                                    .interact_text()
                                    .map_err(|e| FinderError::Prompt(e.to_string()))?,
                            };
                            let query = query.trim().to_string();
                            let coords = geocode::geocode(&config, &query).await?;
                            UserLocation { coords, label: label.unwrap_or(query) }
                        }
                    };

                    store.save(&location)?;
                    println!("{}", display::location_saved_message(&location));
                }

                LocationCommand::Show => match store.load()? {
                    Some(location) => {
                        println!("現在地: {}", location.label);
                        println!("  緯度: {}", location.coords.lat);
                        println!("  経度: {}", location.coords.lng);
                    }
                    None => println!("現在地は設定されていません"),
                },

                LocationCommand::Clear => {
                    store.clear()?;
                    println!("✔ 現在地を削除しました");
                }
            }
        }

        Commands::Config { set_project, set_api_key, set_collection, show } => {
            let mut config = config;
            let changed = set_project.is_some() || set_api_key.is_some() || set_collection.is_some();

            if let Some(project) = set_project {
                config.project_id = Some(project);
            }
            if let Some(key) = set_api_key {
                config.api_key = Some(key);
            }
            if let Some(collection) = set_collection {
                config.collection = collection;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  プロジェクト: {}", config.project_id.as_deref().unwrap_or("未設定"));
                println!("  コレクション: {}", config.collection);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
                println!("  ジオコーダ: {}", config.geocode_url);
                println!("  保存キー: {} / {}", config.coords_key, config.label_key);
            }
        }
    }

    Ok(())
}

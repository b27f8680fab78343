use anyhow::Context;
use clap::Parser;
use lohas::{
    data::source::from_config,
    ui::{error_screen, loading_screen, location_overlay, search_box_ui, sidebar_ui, MapCanvas, MapStyle},
    AppConfig, AppState, CameraProfile, DataLoader, DataSourceConfig, ExpandedDescriptions,
    LoadState, MapViewController, Point, SearchBox, ViewEffect,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "lohas-app", about = "Lohas in Qingpu map viewer")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read categories.json and locations.json from this directory
    #[arg(long, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Fetch from a running lohas-server, e.g. http://127.0.0.1:3000/api
    #[arg(long)]
    base_url: Option<String>,

    /// Jump straight to selected locations instead of flying there
    #[arg(long)]
    no_animation: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config = config.with_data_source(DataSourceConfig::Files { dir });
    } else if let Some(base_url) = args.base_url {
        config = config.with_data_source(DataSourceConfig::Http { base_url });
    }
    if args.no_animation {
        config = config.with_camera_profile(CameraProfile::Instant);
    }
    config.validate().context("invalid configuration")?;

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let source = Arc::from(from_config(&config.data));
    let loader = DataLoader::spawn(runtime.handle(), source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Lohas in Qingpu"),
        ..Default::default()
    };

    eframe::run_native(
        "lohas-app",
        options,
        Box::new(move |_cc| Box::new(LohasApp::new(config, loader, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))?;

    Ok(())
}

struct LohasApp {
    // Keeps the loader's worker alive
    _runtime: tokio::runtime::Runtime,
    loader: DataLoader,
    loaded: bool,
    controller: MapViewController,
    state: AppState,
    search: SearchBox,
    expanded: ExpandedDescriptions,
    style: MapStyle,
}

impl LohasApp {
    fn new(config: AppConfig, loader: DataLoader, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            _runtime: runtime,
            loader,
            loaded: false,
            controller: MapViewController::new(&config, Point::new(1200.0, 800.0)),
            state: AppState::new(),
            search: SearchBox::new(),
            expanded: ExpandedDescriptions::default(),
            style: MapStyle::default(),
        }
    }

    /// Returns whether the map is ready to show
    fn poll_loader(&mut self, ctx: &egui::Context) -> bool {
        if self.loaded {
            return true;
        }
        match self.loader.poll() {
            LoadState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| loading_screen(ui));
                false
            }
            LoadState::Error(message) => {
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| error_screen(ui, &message, &self.style));
                false
            }
            LoadState::Ready(_) => {
                if let Some(data) = self.loader.take_ready() {
                    self.controller.set_data(data);
                    self.loaded = true;
                }
                self.loaded
            }
        }
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        let width = if self.state.sidebar_collapsed { 60.0 } else { 300.0 };
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(width)
            .show(ctx, |ui| {
                if !self.state.sidebar_collapsed {
                    ui.heading("Lohas in Qingpu");
                    ui.add_space(6.0);

                    let chosen =
                        search_box_ui(ui, &mut self.search, self.controller.filtered_locations());
                    if let Some(feature) = chosen {
                        self.controller
                            .select_from_search(&feature, Instant::now());
                    }
                    ui.add_space(6.0);
                }

                let next = sidebar_ui(ui, self.state.clone(), self.controller.categories());
                if next.selected_category != self.state.selected_category
                    && self.controller.set_category(next.selected_category.clone())
                {
                    self.search.on_candidates_changed();
                }
                self.state = next;
            });
    }
}

impl eframe::App for LohasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.poll_loader(ctx) {
            return;
        }

        self.sidebar(ctx);

        if let Some(feature) = self.controller.selected_feature().cloned() {
            if location_overlay(ctx, &feature, &mut self.expanded, &self.style) {
                self.controller.close();
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(MapCanvas::new(
                    &mut self.controller,
                    &mut self.expanded,
                    &self.style,
                ));
            });

        for effect in self.controller.drain_effects() {
            log::debug!("view effect {:?}", effect);
            if let ViewEffect::OpenPopup { feature_id } = &effect {
                // Deferred popups open from tick, after the canvas already painted
                log::info!("showing {}", feature_id);
                ctx.request_repaint();
            }
        }
    }
}

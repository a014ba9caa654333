use anyhow::Context as _;
use incident_map::{
    bootstrap::{layout::stored_direction, BootstrapOutcome},
    prelude::*,
    runtime::spawners::tokio_impl::TokioSpawner,
    ui::{install_fonts, UiMapExt},
};
use std::path::{Path, PathBuf};

const STATE_ENV: &str = "INCIDENT_MAP_STATE";
const CONFIG_ENV: &str = "INCIDENT_MAP_CONFIG";
const PROFILE_ENV: &str = "INCIDENT_MAP_PROFILE";
const FIX_ENV: &str = "INCIDENT_MAP_FIX";
const FONT_ENV: &str = "INCIDENT_MAP_FONT";

const WINDOW_SIZE: [f32; 2] = [430.0, 880.0];

const FONT_CANDIDATES: [&str; 4] = [
    "/usr/share/fonts/truetype/noto/NotoSansHebrew-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Incident map desktop shell
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    incident_map::init_logging();
    init_runtime(Box::new(TokioSpawner::with_handle(
        tokio::runtime::Handle::current(),
    )));

    let store = JsonFileStore::new(state_path());
    let current = stored_direction(&store).context("reading layout flag")?;
    match LayoutBootstrap::new(&store, &ProcessRestarter).run(current)? {
        BootstrapOutcome::Restarted => return Ok(()),
        outcome => log::debug!("Layout bootstrap: {:?}", outcome),
    }
    let direction = init_layout_direction(&store);

    let options = load_options()?;
    let geocoder = Arc::new(MapboxGeocoder::new(
        GeocodingConfig::from_env(),
        options.search.clone(),
    ));
    let location = Arc::new(StaticLocationProvider::new(static_fix()));

    let mut screen = MapScreen::with_viewport_camera(
        options,
        Point::new(WINDOW_SIZE[0] as f64, WINDOW_SIZE[1] as f64),
        location,
        geocoder,
    );
    screen.start();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title("Incident Map"),
        ..Default::default()
    };

    eframe::run_native(
        "incident-map-app",
        native_options,
        Box::new(move |cc| Box::new(IncidentMapApp::new(cc, screen, direction))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}

fn state_path() -> PathBuf {
    std::env::var_os(STATE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("incident-map-state.json"))
}

fn load_options() -> anyhow::Result<ScreenOptions> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        return ScreenOptions::from_json_file(&path)
            .with_context(|| format!("loading screen options from {}", path.display()));
    }

    let profile = match std::env::var(PROFILE_ENV) {
        Ok(name) => ScreenProfile::from_name(&name).unwrap_or_else(|| {
            log::warn!("Unknown profile {:?}, using the default", name);
            ScreenProfile::default()
        }),
        Err(_) => ScreenProfile::default(),
    };
    Ok(profile.resolve())
}

fn static_fix() -> Option<Coordinate> {
    let text = std::env::var(FIX_ENV).ok()?;
    let fix = Coordinate::parse_lon_lat(&text);
    if fix.is_none() {
        log::warn!("{} must be \"lon,lat\", got {:?}", FIX_ENV, text);
    }
    fix
}

struct IncidentMapApp {
    screen: MapScreen,
    view: MapScreenView,
}

impl IncidentMapApp {
    fn new(cc: &eframe::CreationContext<'_>, screen: MapScreen, direction: LayoutDirection) -> Self {
        let custom_font = std::env::var_os(FONT_ENV).map(PathBuf::from);
        let mut candidates: Vec<&Path> = custom_font.iter().map(PathBuf::as_path).collect();
        candidates.extend(FONT_CANDIDATES.iter().map(Path::new));
        install_fonts(&cc.egui_ctx, &candidates);

        let view = MapScreenView::new(&screen.options().asset_dir).with_direction(direction);
        Self { screen, view }
    }

    fn handle_actions(&mut self) {
        for action in self.screen.drain_actions() {
            match action {
                ExternalAction::Menu(item) => {
                    log::info!("Menu action requested: {}", item.action_name())
                }
                ExternalAction::Distress => log::info!("Distress action requested"),
            }
        }
    }
}

impl eframe::App for IncidentMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.screen.poll() {
            ctx.request_repaint();
        }
        let dt = ctx.input(|i| i.stable_dt) as f64;
        self.screen.update(dt);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.map_screen(&mut self.view, &mut self.screen);
            });

        self.handle_actions();
        // Fixes and search results arrive off the UI thread
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

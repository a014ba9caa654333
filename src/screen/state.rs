//! The incident map screen.
//!
//! [`MapScreen`] owns every piece of screen state and is driven from the UI
//! thread: views report [`ScreenEvent`]s, the host calls [`MapScreen::poll`]
//! and [`MapScreen::update`] once per frame. Location fixes, geocoding and the
//! screen's timers run on the async runtime and report back over a channel,
//! so no screen state is ever touched from another thread.

use crate::camera::{CameraController, CameraTarget, CameraView, ViewportCamera};
use crate::core::{
    config::{CameraMode, PlacementMode, ScreenOptions},
    geo::{Coordinate, Point},
    locale,
    viewport::Viewport,
};
use crate::data::catalog::EventCategory;
use crate::input::events::ScreenEvent;
use crate::layers::marker::{Marker, MarkerId, MarkerStore};
use crate::location::LocationService;
use crate::prelude::Arc;
use crate::runtime::{self, AsyncHandle};
use crate::screen::{
    menu::SideMenu,
    picker::{EventPicker, PickerOutcome},
    Alert, Confirmation, ExternalAction,
};
use crate::search::place_search::PlaceSearch;
use crate::traits::{CameraSurface, Geocoder, LocationProvider};
use crate::{MapError, Result};
use crossbeam_channel::{Receiver, Sender};

/// Why a location fix was requested; decides how failures surface
#[derive(Debug, Clone, Copy, PartialEq)]
enum FixPurpose {
    /// Best effort: failures are logged
    InitialCenter,
    /// Critical: failures raise an alert
    PlaceMarker(&'static EventCategory),
    /// Best effort: failures are logged
    Recenter,
}

#[derive(Debug)]
enum ScreenMessage {
    FixResolved {
        purpose: FixPurpose,
        result: Result<Coordinate>,
    },
    FocusRetry {
        target: CameraTarget,
    },
    ResumeFollow {
        ticket: u64,
    },
}

pub struct MapScreen {
    options: ScreenOptions,
    camera: CameraController,
    location: LocationService,
    markers: MarkerStore,
    picker: EventPicker,
    search: PlaceSearch,
    menu: SideMenu,
    alert: Option<Alert>,
    confirmation: Option<Confirmation>,
    actions: Vec<ExternalAction>,
    initial_centered: bool,
    focus_retry: Option<Box<dyn AsyncHandle>>,
    follow_resume: Option<Box<dyn AsyncHandle>>,
    follow_ticket: u64,
    tx: Sender<ScreenMessage>,
    rx: Receiver<ScreenMessage>,
}

impl MapScreen {
    pub fn new(
        options: ScreenOptions,
        surface: Box<dyn CameraSurface>,
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        if let Err(e) = options.validate() {
            log::warn!("Screen options rejected, continuing anyway: {}", e);
        }
        let (tx, rx) = crossbeam_channel::unbounded();
        let camera = CameraController::new(surface).with_follow_on_ready(options.follows_user());
        log::debug!(
            "Map screen: {:?} markers, {:?} camera, {:?} placement",
            options.marker_glyphs,
            options.camera_mode,
            options.placement_mode
        );

        Self {
            picker: EventPicker::new(options.placement_mode),
            search: PlaceSearch::new(geocoder, &options.search),
            camera,
            location: LocationService::new(location),
            markers: MarkerStore::new(),
            menu: SideMenu::default(),
            alert: None,
            confirmation: None,
            actions: Vec::new(),
            initial_centered: false,
            focus_retry: None,
            follow_resume: None,
            follow_ticket: 0,
            tx,
            rx,
            options,
        }
    }

    /// Screen drawing through a [`ViewportCamera`] sized to `size`
    pub fn with_viewport_camera(
        options: ScreenOptions,
        size: Point,
        location: Arc<dyn LocationProvider>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        let mut viewport = Viewport::new(Coordinate::default(), options.camera.initial_zoom, size);
        viewport.set_zoom_limits(options.camera.min_zoom, options.camera.max_zoom);
        let surface = Box::new(ViewportCamera::new(viewport));
        Self::new(options, surface, location, geocoder)
    }

    /// Requests the first fix for the initial camera center
    pub fn start(&mut self) {
        self.request_fix(FixPurpose::InitialCenter);
    }

    pub fn handle_event(&mut self, event: ScreenEvent) {
        log::trace!("Screen event {:?}", event);
        match event {
            ScreenEvent::MapReady => self.on_map_ready(),
            ScreenEvent::MapTouchStart => {
                self.search.close_panel();
                self.on_map_interaction();
            }
            ScreenEvent::MapTapped(coordinate) => {
                self.search.close_panel();
                if let Some(category) = self.picker.take_armed() {
                    self.add_marker(coordinate, category);
                }
            }
            ScreenEvent::ViewChanged(view) => {
                self.cancel_follow_resume();
                self.camera.set_view(view);
            }
            ScreenEvent::LocationUpdated(coordinate) => self.record_fix(coordinate),
            ScreenEvent::QueryChanged(text) => self.search.on_query_changed(text),
            ScreenEvent::QuerySubmitted => self.search.submit_query(),
            ScreenEvent::SearchFocused => self.search.focus_input(),
            ScreenEvent::ResultSelected(index) => self.select_result(index),
            ScreenEvent::AddEventPressed => self.picker.open(),
            ScreenEvent::CategoryChosen(category) => self.choose_category(category),
            ScreenEvent::PickerDismissed => self.picker.dismiss(),
            ScreenEvent::RecenterPressed => self.recenter(),
            ScreenEvent::DistressPressed => {
                log::info!("Distress button pressed");
                self.actions.push(ExternalAction::Distress);
            }
            ScreenEvent::MenuToggled => self.menu.toggle(),
            ScreenEvent::MenuItemSelected(item) => {
                let action = self.menu.select(item);
                self.actions.push(action);
            }
            ScreenEvent::MarkerLongPressed(id) => self.request_marker_removal(id),
            ScreenEvent::ConfirmationResolved(confirmed) => self.resolve_confirmation(confirmed),
            ScreenEvent::AlertDismissed => self.alert = None,
        }
    }

    /// Applies finished async work; returns true when anything changed
    pub fn poll(&mut self) -> bool {
        let mut changed = self.search.poll();
        while let Ok(message) = self.rx.try_recv() {
            changed = true;
            match message {
                ScreenMessage::FixResolved { purpose, result } => self.on_fix(purpose, result),
                ScreenMessage::FocusRetry { target } => {
                    self.focus_retry = None;
                    if !self.camera.jump_to(target) {
                        log::warn!("Map still not ready; dropping focus on {}", target.coordinate);
                    }
                }
                ScreenMessage::ResumeFollow { ticket } => {
                    if ticket == self.follow_ticket {
                        self.follow_resume = None;
                        log::debug!("Resuming follow mode");
                        self.camera.enable_follow();
                    }
                }
            }
        }
        changed
    }

    /// Advances camera animation by `delta_time` seconds
    pub fn update(&mut self, delta_time: f64) {
        self.camera.update(delta_time);
    }

    /// Takes the actions queued for the host
    pub fn drain_actions(&mut self) -> Vec<ExternalAction> {
        std::mem::take(&mut self.actions)
    }

    fn on_map_ready(&mut self) {
        if self.camera.is_ready() {
            return;
        }
        self.camera.mark_ready();
        self.try_initial_center();
    }

    fn on_map_interaction(&mut self) {
        self.cancel_follow_resume();
        self.camera.on_user_interaction();
    }

    fn record_fix(&mut self, coordinate: Coordinate) {
        self.location.record_fix(coordinate);
        if self.location.last_known_fix() == Some(coordinate) {
            self.camera.user_position_changed(coordinate);
            self.try_initial_center();
        }
    }

    /// Centers on the first known fix once the map is ready
    fn try_initial_center(&mut self) {
        if self.initial_centered || !self.camera.is_ready() {
            return;
        }
        let Some(coordinate) = self.location.last_known_fix() else {
            return;
        };
        self.initial_centered = true;
        self.camera.jump_to(CameraTarget::immediate(
            coordinate,
            self.options.camera.initial_zoom,
        ));
        if self.options.follows_user() {
            self.camera.enable_follow();
        }
    }

    fn request_fix(&self, purpose: FixPurpose) {
        let fix = self.location.request_current_fix();
        let tx = self.tx.clone();
        log::debug!("Requesting location fix for {:?}", purpose);
        runtime::spawn(async move {
            let result = fix.await;
            let _ = tx.send(ScreenMessage::FixResolved { purpose, result });
        });
    }

    fn on_fix(&mut self, purpose: FixPurpose, result: Result<Coordinate>) {
        let coordinate = match result {
            Ok(coordinate) => coordinate,
            Err(e) => {
                match purpose {
                    FixPurpose::PlaceMarker(category) => {
                        log::warn!("Cannot place {}: {}", category.id, e);
                        let message = match e {
                            MapError::PermissionDenied => locale::ALERT_NO_PERMISSION,
                            _ => locale::ALERT_NO_LOCATION,
                        };
                        self.alert = Some(Alert::new(locale::ALERT_ERROR_TITLE, message));
                    }
                    FixPurpose::InitialCenter | FixPurpose::Recenter => {
                        log::warn!("Location fix for {:?} failed: {}", purpose, e);
                    }
                }
                return;
            }
        };

        self.record_fix(coordinate);
        match purpose {
            FixPurpose::InitialCenter => {}
            FixPurpose::PlaceMarker(category) => self.place_and_focus(coordinate, category),
            FixPurpose::Recenter => self.recenter_on(coordinate),
        }
    }

    fn choose_category(&mut self, category: &'static EventCategory) {
        match self.picker.choose(category) {
            PickerOutcome::PlaceNow(category) => match self.location.last_known_fix() {
                Some(coordinate) => self.place_and_focus(coordinate, category),
                None => self.request_fix(FixPurpose::PlaceMarker(category)),
            },
            PickerOutcome::Armed(_) => {}
        }
    }

    fn place_and_focus(&mut self, coordinate: Coordinate, category: &'static EventCategory) {
        self.add_marker(coordinate, category);
        if self.options.camera_mode == CameraMode::ManualRecenter
            && self.options.placement_mode == PlacementMode::Eager
            && self.camera.is_ready()
        {
            self.camera.jump_to(CameraTarget::new(
                coordinate,
                self.options.camera.marker_focus_zoom,
                self.options.camera.marker_focus_duration(),
            ));
        }
    }

    /// Appends a marker at `coordinate`
    pub fn add_marker(&mut self, coordinate: Coordinate, category: &'static EventCategory) -> Option<Marker> {
        if !coordinate.is_valid() {
            log::warn!("Refusing marker at invalid coordinate {}", coordinate);
            return None;
        }
        Some(self.markers.add(coordinate, category))
    }

    /// Long press on a marker: ask before removing it
    pub fn request_marker_removal(&mut self, id: MarkerId) {
        if self.markers.get(&id).is_none() {
            log::debug!("Long press on unknown marker {}", id);
            return;
        }
        self.confirmation = Some(Confirmation::RemoveMarker(id));
    }

    pub fn resolve_confirmation(&mut self, confirmed: bool) {
        match self.confirmation.take() {
            Some(Confirmation::RemoveMarker(id)) if confirmed => {
                self.markers.remove(&id);
            }
            Some(Confirmation::RemoveMarker(id)) => {
                log::debug!("Removal of {} cancelled", id);
            }
            None => {}
        }
    }

    /// Moves the camera back to the user
    pub fn recenter(&mut self) {
        match self.location.last_known_fix() {
            Some(coordinate) => self.recenter_on(coordinate),
            None => self.request_fix(FixPurpose::Recenter),
        }
    }

    fn recenter_on(&mut self, coordinate: Coordinate) {
        let target = CameraTarget::new(
            coordinate,
            self.options.camera.recenter_zoom,
            self.options.camera.recenter_duration(),
        );
        if !self.camera.jump_to(target) {
            return;
        }
        if self.options.follows_user() {
            self.schedule_follow_resume();
        }
    }

    fn schedule_follow_resume(&mut self) {
        self.cancel_follow_resume();
        let ticket = self.follow_ticket;
        let tx = self.tx.clone();
        self.follow_resume = Some(runtime::spawn_after(
            self.options.camera.follow_resume_delay(),
            move || {
                let _ = tx.send(ScreenMessage::ResumeFollow { ticket });
            },
        ));
    }

    fn cancel_follow_resume(&mut self) {
        self.follow_ticket += 1;
        if let Some(handle) = self.follow_resume.take() {
            handle.cancel();
        }
    }

    /// Focuses the camera on a search result, retrying once if the map is not ready
    pub fn select_result(&mut self, index: usize) {
        let Some(result) = self.search.select_result(index) else {
            log::debug!("No search result at index {}", index);
            return;
        };
        let target = CameraTarget::new(
            result.coordinate,
            self.options.search.focus_zoom,
            self.options.search.focus_duration(),
        );
        if let Some(previous) = self.focus_retry.take() {
            previous.cancel();
        }
        if self.camera.jump_to(target) {
            return;
        }

        let tx = self.tx.clone();
        self.focus_retry = Some(runtime::spawn_after(
            self.options.search.focus_retry_delay(),
            move || {
                let _ = tx.send(ScreenMessage::FocusRetry { target });
            },
        ));
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    pub fn markers(&self) -> &[Marker] {
        self.markers.markers()
    }

    pub fn search(&self) -> &PlaceSearch {
        &self.search
    }

    pub fn picker(&self) -> &EventPicker {
        &self.picker
    }

    pub fn menu(&self) -> &SideMenu {
        &self.menu
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn camera_view(&self) -> CameraView {
        self.camera.view()
    }

    pub fn is_map_ready(&self) -> bool {
        self.camera.is_ready()
    }

    pub fn last_known_fix(&self) -> Option<Coordinate> {
        self.location.last_known_fix()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }
}

impl std::fmt::Debug for MapScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapScreen")
            .field("camera", &self.camera)
            .field("markers", &self.markers.len())
            .field("search", &self.search)
            .field("alert", &self.alert)
            .field("confirmation", &self.confirmation)
            .finish()
    }
}

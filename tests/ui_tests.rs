#![cfg(feature = "egui")]

use async_trait::async_trait;
use incident_map::core::locale;
use incident_map::data::catalog;
use incident_map::prelude::*;

/// Headless egui frames driving the screen view
#[cfg(test)]
mod ui_tests {
    use super::*;
    use egui::{Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Shape, Vec2};

    struct NoGeocoder;

    #[async_trait]
    impl Geocoder for NoGeocoder {
        async fn forward(&self, _query: &str) -> Result<Vec<SearchResult>> {
            Ok(Vec::new())
        }
    }

    fn screen(profile: ScreenProfile) -> MapScreen {
        MapScreen::with_viewport_camera(
            profile.resolve(),
            Point::new(430.0, 880.0),
            Arc::new(StaticLocationProvider::new(None)),
            Arc::new(NoGeocoder),
        )
    }

    fn input() -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(430.0, 880.0))),
            ..Default::default()
        }
    }

    /// Input at `time` seconds carrying `events`
    fn input_at(time: f64, events: Vec<Event>) -> RawInput {
        RawInput {
            time: Some(time),
            events,
            ..input()
        }
    }

    fn touch(pos: Pos2, pressed: bool) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Modifiers::default(),
            },
        ]
    }

    /// Runs one frame and returns the rect the map was drawn into
    fn run_frame(ctx: &Context, view: &mut MapScreenView, screen: &mut MapScreen) -> Rect {
        run_frame_with(ctx, input(), view, screen).0
    }

    /// Runs one frame on `raw`; also returns every string painted
    fn run_frame_with(
        ctx: &Context,
        raw: RawInput,
        view: &mut MapScreenView,
        screen: &mut MapScreen,
    ) -> (Rect, Vec<String>) {
        let mut rect = Rect::NOTHING;
        let output = ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = ui.map_screen(view, screen).rect;
            });
        });

        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        (rect, texts)
    }

    fn collect_text(shape: &Shape, texts: &mut Vec<String>) {
        match shape {
            Shape::Text(text) => texts.push(text.galley.text().to_string()),
            Shape::Vec(shapes) => shapes.iter().for_each(|shape| collect_text(shape, texts)),
            _ => {}
        }
    }

    /// Screen with one marker at the camera center, map already drawn once
    fn screen_with_marker(ctx: &Context, view: &mut MapScreenView) -> (MapScreen, Pos2) {
        let mut screen = screen(ScreenProfile::IconRecenter);
        let center = screen.camera_view().center;
        screen.add_marker(center, &catalog::CATEGORIES[0]).unwrap();
        let (rect, _) = run_frame_with(ctx, input_at(0.0, Vec::new()), view, &mut screen);
        (screen, rect.center())
    }

    #[test]
    fn test_first_frame_marks_map_ready() {
        let ctx = Context::default();
        let mut screen = screen(ScreenProfile::IconRecenter);
        let mut view = MapScreenView::new("/nonexistent/icons");
        assert!(!screen.is_map_ready());

        let rect = run_frame(&ctx, &mut view, &mut screen);

        assert!(rect.width() > 0.0);
        assert!(rect.height() > 0.0);
        assert!(screen.is_map_ready());
    }

    #[test]
    fn test_frames_with_markers_and_dialogs() {
        let ctx = Context::default();
        let mut screen = screen(ScreenProfile::EmojiFollow);
        let mut view = MapScreenView::new("/nonexistent/icons")
            .with_direction(LayoutDirection::RightToLeft);

        let center = screen.camera_view().center;
        let marker = screen.add_marker(center, &catalog::CATEGORIES[0]).unwrap();
        screen.handle_event(ScreenEvent::AddEventPressed);
        screen.handle_event(ScreenEvent::MenuToggled);
        screen.handle_event(ScreenEvent::MarkerLongPressed(marker.id().clone()));

        for _ in 0..3 {
            run_frame(&ctx, &mut view, &mut screen);
        }

        assert_eq!(screen.markers().len(), 1);
        assert!(screen.picker().is_open());
        assert!(screen.menu().is_open());
        assert!(screen.confirmation().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_search_draws_no_results_text() {
        let ctx = Context::default();
        let mut screen = screen(ScreenProfile::IconRecenter);
        let mut view = MapScreenView::new("/nonexistent/icons");
        let no_results = locale::visual_order(locale::SEARCH_NO_RESULTS);

        screen.handle_event(ScreenEvent::QueryChanged("Atlantis".to_string()));
        tokio::time::sleep(Duration::from_millis(400)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
            screen.poll();
        }
        assert!(screen.search().shows_empty_state());

        let (_, texts) = run_frame_with(&ctx, input(), &mut view, &mut screen);
        assert!(texts.contains(&no_results), "painted: {:?}", texts);
    }

    #[test]
    fn test_holding_a_marker_asks_to_remove_it() {
        let ctx = Context::default();
        let mut view = MapScreenView::new("/nonexistent/icons");
        let (mut screen, marker_pos) = screen_with_marker(&ctx, &mut view);

        run_frame_with(&ctx, input_at(0.1, touch(marker_pos, true)), &mut view, &mut screen);
        run_frame_with(&ctx, input_at(0.3, Vec::new()), &mut view, &mut screen);
        assert!(screen.confirmation().is_none());

        run_frame_with(&ctx, input_at(0.8, Vec::new()), &mut view, &mut screen);
        assert!(screen.confirmation().is_some());
        assert_eq!(screen.markers().len(), 1);
    }

    #[test]
    fn test_short_tap_on_marker_keeps_it() {
        let ctx = Context::default();
        let mut view = MapScreenView::new("/nonexistent/icons");
        let (mut screen, marker_pos) = screen_with_marker(&ctx, &mut view);

        run_frame_with(&ctx, input_at(0.1, touch(marker_pos, true)), &mut view, &mut screen);
        run_frame_with(&ctx, input_at(0.2, touch(marker_pos, false)), &mut view, &mut screen);
        run_frame_with(&ctx, input_at(1.0, Vec::new()), &mut view, &mut screen);

        assert!(screen.confirmation().is_none());
        assert_eq!(screen.markers().len(), 1);
    }
}

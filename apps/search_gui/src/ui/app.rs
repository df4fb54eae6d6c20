use client_core::{Completion, DisplayState, FetchRequest, QueryController, SearchAddress};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets::{result_card, skeleton_card, SKELETON_CARDS};

const APP_TITLE: &str = "TəmuSəarch";

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub address: Option<SearchAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppViewState {
    Home,
    Results,
}

pub struct SearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: QueryController,
    view_state: AppViewState,
    status: String,
    fatal_error: Option<UiError>,
}

impl SearchApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            controller: QueryController::new(),
            view_state: AppViewState::Home,
            status: String::new(),
            fatal_error: None,
        };
        if let Some(address) = startup.address {
            app.view_state = AppViewState::Results;
            let request = app.controller.navigate(address);
            app.run(request);
        }
        app
    }

    /// Queues a fetch produced by the controller, or cancels the in-flight
    /// one when the controller cleared its results instead.
    fn run(&mut self, request: Option<FetchRequest>) {
        self.status.clear();
        match request {
            Some(request) => {
                self.view_state = AppViewState::Results;
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::Search(request),
                    &mut self.status,
                );
            }
            None => {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::Cancel, &mut self.status);
            }
        }
    }

    fn submit(&mut self) {
        let request = self.controller.submit();
        self.run(request);
    }

    /// On Home the toggle only records the mode; once a search exists it
    /// re-runs the query.
    fn set_llm_enhanced(&mut self, llm_enhanced: bool) {
        if self.view_state == AppViewState::Home {
            self.controller.set_mode(llm_enhanced);
            return;
        }
        let request = self.controller.set_llm_enhanced(llm_enhanced);
        self.run(request);
    }

    fn go_home(&mut self) {
        self.controller = QueryController::new();
        self.view_state = AppViewState::Home;
        self.run(None);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SearchCompleted {
                    generation,
                    outcome,
                } => {
                    if let Err(err) = &outcome {
                        let ui_error = UiError::from_search_error(UiErrorContext::Search, err);
                        tracing::warn!(
                            generation,
                            category = err_label(ui_error.category()),
                            "search failed: {}",
                            ui_error.message()
                        );
                    }
                    if self.controller.complete(generation, outcome) == Completion::Stale {
                        tracing::debug!(generation, "ignored superseded search result");
                    }
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if err.is_fatal() {
                        self.fatal_error = Some(err);
                    }
                }
            }
        }
    }

    fn query_row(&mut self, ui: &mut egui::Ui, id: &'static str, autofocus: bool) {
        let mut submitted = false;
        let mut llm_enhanced = self.controller.llm_enhanced();

        ui.horizontal(|ui| {
            let button_width = 96.0;
            let edit = egui::TextEdit::singleline(self.controller.draft_mut())
                .id_salt(id)
                .hint_text(
                    egui::RichText::new("Search titles, plots, tags…")
                        .color(ui.visuals().weak_text_color()),
                )
                .desired_width(ui.available_width() - button_width - 8.0);
            let response = ui.add_sized([ui.available_width() - button_width - 8.0, 34.0], edit);
            if autofocus && !response.has_focus() && self.controller.draft().is_empty() {
                response.request_focus();
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
            let button = egui::Button::new(egui::RichText::new("Search").strong())
                .min_size(egui::vec2(button_width, 34.0));
            if ui.add_enabled(self.fatal_error.is_none(), button).clicked() {
                submitted = true;
            }
        });
        ui.checkbox(&mut llm_enhanced, "LLM Enhanced");

        if llm_enhanced != self.controller.llm_enhanced() {
            self.set_llm_enhanced(llm_enhanced);
        } else if submitted {
            self.submit();
        }
    }

    fn show_home_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(420.0, 640.0);
            ui.add_space((avail.y * 0.22).clamp(24.0, 180.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                ui.label(egui::RichText::new(APP_TITLE).size(48.0).strong());
                ui.add_space(18.0);

                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                        self.query_row(ui, "home_query", true);
                    });
            });
        });
    }

    fn show_results_screen(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("results_header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add(egui::Button::new(egui::RichText::new(APP_TITLE).strong()).frame(false))
                        .on_hover_text("Back to home")
                        .clicked()
                    {
                        self.go_home();
                    }
                });
                self.query_row(ui, "results_query", false);
                self.tag_menu(ui);
                self.share_row(ui);
                ui.add_space(6.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.results_body(ui));
        });
    }

    fn tag_menu(&mut self, ui: &mut egui::Ui) {
        let tags = self.controller.tag_universe().to_vec();
        if tags.is_empty() {
            return;
        }
        let mut toggled = None;
        let mut clear = false;
        ui.horizontal_wrapped(|ui| {
            ui.weak("Tags:");
            for tag in &tags {
                let selected = self.controller.selected_tags().contains(tag);
                if ui.add(egui::Button::new(tag.as_str()).selected(selected)).clicked() {
                    toggled = Some(tag.clone());
                }
            }
            let any_selected = !self.controller.selected_tags().is_empty();
            if ui.add_enabled(any_selected, egui::Button::new("Clear")).clicked() {
                clear = true;
            }
        });
        if let Some(tag) = toggled {
            self.controller.toggle_tag(&tag);
        }
        if clear {
            self.controller.clear_tags();
        }
    }

    fn share_row(&self, ui: &mut egui::Ui) {
        let Some(address) = self.controller.address() else {
            return;
        };
        let path = address.results_path();
        ui.horizontal(|ui| {
            ui.weak("Share:");
            ui.monospace(&path);
            if ui.small_button("Copy").clicked() {
                ui.ctx().copy_text(path.clone());
            }
        });
    }

    fn results_body(&self, ui: &mut egui::Ui) {
        if let Some(err) = &self.fatal_error {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("{} error: {}", err_label(err.category()), err.message()),
            );
            return;
        }

        match self.controller.display() {
            DisplayState::Idle => {
                ui.weak("Type a query and press Enter.");
            }
            DisplayState::Loading => {
                for _ in 0..SKELETON_CARDS {
                    skeleton_card(ui);
                    ui.add_space(8.0);
                }
            }
            DisplayState::Failed { message } => {
                ui.colored_label(ui.visuals().error_fg_color, format!("Error: {message}"));
            }
            DisplayState::NoResults => {
                ui.label("No results found.");
            }
            DisplayState::NoMatches => {
                ui.label("No results match the selected tags.");
            }
            DisplayState::Results { groups } => {
                for group in &groups {
                    result_card(ui, group);
                    ui.add_space(8.0);
                }
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        if self.status.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(&self.status);
        });
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        match self.view_state {
            AppViewState::Home => self.show_home_screen(ctx),
            AppViewState::Results => self.show_results_screen(ctx),
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::{domain::SearchResult, error::SearchError};

    fn app_with(
        startup: StartupConfig,
    ) -> (SearchApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        (SearchApp::bootstrap(cmd_tx, ui_rx, startup), cmd_rx, ui_tx)
    }

    fn titled(title: &str, tag: &str) -> SearchResult {
        SearchResult {
            tags: Some(vec![tag.to_string()]),
            plot: Some(format!("{title} plot")),
            ..SearchResult::titled(title)
        }
    }

    #[test]
    fn startup_address_opens_results_and_queues_search() {
        let (app, cmd_rx, _ui_tx) = app_with(StartupConfig {
            address: Some(SearchAddress::parse("/results?query=alien&llm=1")),
        });
        assert_eq!(app.view_state, AppViewState::Results);
        assert_eq!(app.controller.display(), DisplayState::Loading);
        match cmd_rx.try_recv() {
            Ok(BackendCommand::Search(request)) => {
                assert_eq!(request.query, "alien");
                assert!(request.mode.is_llm_enhanced());
            }
            _ => panic!("expected a queued search"),
        }
    }

    #[test]
    fn home_submit_with_blank_draft_stays_home() {
        let (mut app, cmd_rx, _ui_tx) = app_with(StartupConfig::default());
        app.controller.set_draft("   ");
        app.submit();
        assert_eq!(app.view_state, AppViewState::Home);
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Cancel)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn completed_events_apply_only_for_latest_generation() {
        let (mut app, cmd_rx, ui_tx) = app_with(StartupConfig::default());
        app.controller.set_draft("first");
        app.submit();
        app.controller.set_draft("second");
        app.submit();
        assert_eq!(cmd_rx.len(), 2);

        ui_tx
            .send(UiEvent::SearchCompleted {
                generation: 1,
                outcome: Ok(vec![titled("Old", "stale")]),
            })
            .expect("send");
        ui_tx
            .send(UiEvent::SearchCompleted {
                generation: 2,
                outcome: Ok(vec![titled("New", "fresh")]),
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.controller.tag_universe(), ["fresh".to_string()]);
        match app.controller.display() {
            DisplayState::Results { groups } => assert_eq!(groups[0].title, "New"),
            other => panic!("unexpected display: {other:?}"),
        }
    }

    #[test]
    fn failed_search_shows_error_state() {
        let (mut app, _cmd_rx, ui_tx) = app_with(StartupConfig {
            address: Some(SearchAddress::new("alien", false)),
        });
        ui_tx
            .send(UiEvent::SearchCompleted {
                generation: app.controller.generation(),
                outcome: Err(SearchError::HttpStatus { status: 500 }),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(
            app.controller.display(),
            DisplayState::Failed {
                message: "Failed to fetch results (HTTP 500)".to_string()
            }
        );
    }

    #[test]
    fn startup_failure_is_kept_as_fatal_error() {
        let (mut app, _cmd_rx, ui_tx) = app_with(StartupConfig::default());
        ui_tx
            .send(UiEvent::Error(UiError::startup(
                "backend worker startup failure: failed to build runtime",
            )))
            .expect("send");
        app.process_ui_events();
        assert!(app.fatal_error.is_some());
        assert!(app.status.starts_with("Configuration error:"));
    }

    #[test]
    fn toggling_mode_on_home_does_not_search() {
        let (mut app, cmd_rx, _ui_tx) = app_with(StartupConfig::default());
        app.controller.set_draft("alien");
        app.set_llm_enhanced(true);

        assert_eq!(app.view_state, AppViewState::Home);
        assert!(app.controller.llm_enhanced());
        assert!(cmd_rx.try_recv().is_err());

        app.submit();
        match cmd_rx.try_recv() {
            Ok(BackendCommand::Search(request)) => assert!(request.mode.is_llm_enhanced()),
            _ => panic!("expected a queued search"),
        }
    }

    #[test]
    fn toggling_mode_on_results_reissues_search() {
        let (mut app, cmd_rx, _ui_tx) = app_with(StartupConfig {
            address: Some(SearchAddress::new("alien", false)),
        });
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Search(_))));

        app.set_llm_enhanced(true);
        match cmd_rx.try_recv() {
            Ok(BackendCommand::Search(request)) => {
                assert_eq!(request.query, "alien");
                assert!(request.mode.is_llm_enhanced());
            }
            _ => panic!("expected a re-issued search"),
        }
    }

    #[test]
    fn going_home_resets_query_state() {
        let (mut app, cmd_rx, _ui_tx) = app_with(StartupConfig {
            address: Some(SearchAddress::new("alien", true)),
        });
        app.go_home();
        assert_eq!(app.view_state, AppViewState::Home);
        assert!(app.controller.address().is_none());
        assert!(!app.controller.llm_enhanced());
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Search(_))));
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Cancel)));
    }
}

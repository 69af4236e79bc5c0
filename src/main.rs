use eframe::egui;
use egui::{Color32, CornerRadius, RichText, ScrollArea, Stroke, Ui, ViewportBuilder};
use std::sync::mpsc;
use std::thread;

mod joke_client;
mod models;

use crate::joke_client::{collect_jokes, JokeClient};
use crate::models::{Joke, JokeBoard};

const DEFAULT_JOKE_COUNT: usize = 5;

fn main() -> Result<(), eframe::Error> {
    // Optional first argument overrides how many jokes each cycle collects
    let target_count = std::env::args()
        .nth(1)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_JOKE_COUNT);

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([480.0, 480.0])
            .with_title("Dad Jokes"),
        ..Default::default()
    };

    eframe::run_native(
        "Dad Jokes",
        options,
        Box::new(move |_cc| {
            let app = DadJokesApp::new(target_count)
                .map_err(|e| format!("failed to set up the HTTP client: {}", e))?;
            Ok(Box::new(app))
        }),
    )
}

struct AppTheme {
    background: Color32,
    card_background: Color32,
    text: Color32,
    secondary_text: Color32,
    highlight: Color32,
    separator: Color32,
    error: Color32,
    vote_positive: Color32,
    vote_neutral: Color32,
    vote_negative: Color32,
    button_background: Color32,
    button_foreground: Color32,
    button_active_background: Color32,
    button_hover_background: Color32,
}

impl AppTheme {
    fn dark() -> Self {
        Self {
            background: Color32::from_rgb(18, 18, 18),
            card_background: Color32::from_rgb(30, 30, 30),
            text: Color32::from_rgb(240, 240, 240),
            secondary_text: Color32::from_rgb(180, 180, 180),
            highlight: Color32::from_rgb(255, 170, 0),
            separator: Color32::from_rgb(60, 60, 60),
            error: Color32::from_rgb(229, 115, 115),
            vote_positive: Color32::from_rgb(76, 175, 80),   // Green
            vote_neutral: Color32::from_rgb(158, 158, 158),  // Gray
            vote_negative: Color32::from_rgb(239, 83, 80),   // Red
            button_background: Color32::from_rgb(45, 45, 45),
            button_foreground: Color32::from_rgb(230, 230, 230),
            button_active_background: Color32::from_rgb(70, 70, 70),
            button_hover_background: Color32::from_rgb(58, 58, 58),
        }
    }

    fn light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 246),
            card_background: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(30, 30, 30),
            secondary_text: Color32::from_rgb(100, 100, 100),
            highlight: Color32::from_rgb(230, 126, 0),
            separator: Color32::from_rgb(220, 220, 220),
            error: Color32::from_rgb(198, 40, 40),
            vote_positive: Color32::from_rgb(56, 142, 60),
            vote_neutral: Color32::from_rgb(120, 120, 120),
            vote_negative: Color32::from_rgb(211, 47, 47),
            button_background: Color32::from_rgb(235, 235, 232),
            button_foreground: Color32::from_rgb(40, 40, 40),
            button_active_background: Color32::from_rgb(210, 210, 206),
            button_hover_background: Color32::from_rgb(222, 222, 218),
        }
    }

    fn apply_to_ctx(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Set base colors
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.card_background;
        style.visuals.window_stroke = Stroke::new(1.0, self.separator);
        style.visuals.widgets.noninteractive.bg_fill = self.card_background;

        // Set text colors
        style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);

        // Set button styles
        style.visuals.widgets.inactive.bg_fill = self.button_background;
        style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.active.bg_fill = self.button_active_background;
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.button_foreground);
        style.visuals.widgets.hovered.bg_fill = self.button_hover_background;
        style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.button_foreground);

        // Set selection color
        style.visuals.selection.bg_fill = self.highlight;
        style.visuals.selection.stroke = Stroke::new(1.0, self.highlight);

        // Set various rounding amounts
        style.visuals.window_corner_radius = CornerRadius::same(8);
        style.visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
        style.visuals.widgets.active.corner_radius = CornerRadius::same(4);

        ctx.set_style(style);
    }

    // Color for a joke's vote tally based on its sign
    fn vote_color(&self, votes: i32) -> Color32 {
        if votes > 0 {
            self.vote_positive
        } else if votes < 0 {
            self.vote_negative
        } else {
            self.vote_neutral
        }
    }

    // Card border gets a tinted stroke once a joke has been voted on
    fn card_stroke(&self, votes: i32) -> Stroke {
        if votes == 0 {
            Stroke::new(1.0, self.separator)
        } else {
            Stroke::new(1.0, self.vote_color(votes))
        }
    }
}

struct DadJokesApp {
    joke_client: JokeClient,
    board: JokeBoard,
    target_count: usize,
    theme: AppTheme,
    is_dark_mode: bool,
    // Worker thread for the current collection cycle, if one is running
    load_thread: Option<thread::JoinHandle<()>>,
    jokes_receiver: Option<mpsc::Receiver<anyhow::Result<Vec<Joke>>>>,
    last_error: Option<String>,
    needs_repaint: bool,
    started: bool,
}

impl DadJokesApp {
    fn new(target_count: usize) -> anyhow::Result<Self> {
        Ok(Self {
            joke_client: JokeClient::new()?,
            board: JokeBoard::new(),
            target_count,
            theme: AppTheme::dark(),
            is_dark_mode: true,
            load_thread: None,
            jokes_receiver: None,
            last_error: None,
            needs_repaint: false,
            started: false,
        })
    }

    /// Starts a collection cycle on a worker thread. Calls made while a
    /// cycle is still in flight are ignored rather than racing it.
    fn load_jokes(&mut self) {
        if self.jokes_receiver.is_some() {
            return; // Don't start another load if we're already loading
        }

        self.last_error = None;
        self.board.begin_refresh();

        let mut client = self.joke_client.clone();
        let target = self.target_count;
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let _ = tx.send(collect_jokes(&mut client, target));
        });

        self.load_thread = Some(handle);
        self.jokes_receiver = Some(rx);
    }

    /// Polled every frame: commits or aborts the cycle once the worker
    /// thread reports back.
    fn check_loading_thread(&mut self) {
        let Some(rx) = &self.jokes_receiver else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(jokes)) => {
                self.board.commit(jokes);
                self.jokes_receiver = None;
                self.load_thread = None;
                self.needs_repaint = true;
            }
            Ok(Err(e)) => {
                eprintln!("failed to fetch jokes: {:#}", e);
                // Prior jokes stay; the spinner clears so the user can retry
                self.last_error = Some(format!("Couldn't fetch jokes: {}", e));
                self.board.abort_refresh();
                self.jokes_receiver = None;
                self.load_thread = None;
                self.needs_repaint = true;
            }
            Err(mpsc::TryRecvError::Empty) => {
                // Still waiting for results
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                eprintln!("joke loading thread went away without reporting");
                self.last_error = Some("Couldn't fetch jokes: worker stopped".to_string());
                self.board.abort_refresh();
                self.jokes_receiver = None;
                self.load_thread = None;
                self.needs_repaint = true;
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
        self.theme = if self.is_dark_mode {
            AppTheme::dark()
        } else {
            AppTheme::light()
        };
    }

    fn render_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                RichText::new("Dad Jokes")
                    .color(self.theme.highlight)
                    .size(24.0),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Theme toggle button
                let theme_icon = if self.is_dark_mode { "☀" } else { "☾" };
                let theme_btn = ui.add(
                    egui::Button::new(
                        RichText::new(theme_icon)
                            .color(self.theme.button_foreground)
                            .size(20.0),
                    )
                    .min_size(egui::Vec2::new(32.0, 32.0))
                    .corner_radius(CornerRadius::same(16))
                    .fill(self.theme.button_background),
                );

                if theme_btn.hovered() {
                    ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                }

                if theme_btn.clicked() {
                    self.toggle_theme();
                    self.needs_repaint = true;
                }
            });
        });
    }

    fn render_joke_list(&mut self, ui: &mut Ui) {
        let mut regenerate = false;

        ui.vertical_centered(|ui| {
            let get_new_btn = ui.add_sized(
                [180.0, 36.0],
                egui::Button::new(
                    RichText::new("Get New Jokes")
                        .size(16.0)
                        .color(self.theme.button_foreground),
                )
                .corner_radius(CornerRadius::same(8))
                .fill(self.theme.button_background),
            );

            if get_new_btn.hovered() {
                ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
            }

            if get_new_btn.clicked() {
                regenerate = true;
            }
        });

        if regenerate {
            self.load_jokes();
            self.needs_repaint = true;
            return; // The spinner takes over on the next frame
        }

        if let Some(error) = &self.last_error {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new(error).color(self.theme.error).size(14.0));
            });
        }

        ui.add_space(8.0);

        // Votes can land while iterating a snapshot, so clicks are collected
        // here and applied to the board after the loop
        let mut pending_vote: Option<(String, i32)> = None;

        ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for joke in self.board.sorted_jokes() {
                    joke_card(ui, &self.theme, &joke, &mut |id, delta| {
                        pending_vote = Some((id.to_string(), delta));
                    });
                }
            });

        if let Some((id, delta)) = pending_vote {
            self.board.vote(&id, delta);
            self.needs_repaint = true;
        }
    }
}

/// One joke card: thumbs up/down, the vote tally, and the joke text.
/// Stateless; vote clicks are only forwarded through the supplied `vote`
/// callback as `(id, +1)` or `(id, -1)`.
fn joke_card(ui: &mut Ui, theme: &AppTheme, joke: &Joke, vote: &mut dyn FnMut(&str, i32)) {
    egui::Frame::new()
        .fill(theme.card_background)
        .corner_radius(CornerRadius::same(8))
        .stroke(theme.card_stroke(joke.votes))
        .inner_margin(12.0)
        .outer_margin(egui::vec2(8.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                // Vote area on the left
                let up_btn = ui.add_sized(
                    [32.0, 28.0],
                    egui::Button::new(RichText::new("👍").size(14.0))
                        .corner_radius(CornerRadius::same(6))
                        .fill(theme.button_background),
                );
                if up_btn.clicked() {
                    vote(&joke.id, 1);
                }

                let down_btn = ui.add_sized(
                    [32.0, 28.0],
                    egui::Button::new(RichText::new("👎").size(14.0))
                        .corner_radius(CornerRadius::same(6))
                        .fill(theme.button_background),
                );
                if down_btn.clicked() {
                    vote(&joke.id, -1);
                }

                if up_btn.hovered() || down_btn.hovered() {
                    ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                }

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{}", joke.votes))
                        .color(theme.vote_color(joke.votes))
                        .size(16.0)
                        .strong(),
                );

                ui.add_space(10.0);

                // Joke text fills the rest of the row
                ui.add(
                    egui::Label::new(RichText::new(&joke.text).color(theme.text).size(15.0))
                        .wrap(),
                );
            });
        });
}

impl eframe::App for DadJokesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply our custom theme
        self.theme.apply_to_ctx(ctx);

        // Check if we have finished loading
        self.check_loading_thread();

        // Kick off the first collection cycle on the first frame
        if !self.started {
            self.started = true;
            self.load_jokes();
        }

        // Request repaint if needed
        if self.needs_repaint {
            ctx.request_repaint();
            self.needs_repaint = false;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_header(ui);
            ui.add_space(4.0);
            ui.add(egui::Separator::default().spacing(8.0));

            if self.board.is_loading() {
                // Loading indicator while a cycle is in flight
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.spinner();
                    ui.add_space(20.0);
                    ui.label(
                        RichText::new("Loading...")
                            .color(self.theme.secondary_text)
                            .size(18.0),
                    );
                });
                return;
            }

            self.render_joke_list(ui);
        });
    }
}

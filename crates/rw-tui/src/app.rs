//! Layout viewer - draws one generated map and reacts to keys

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as Segment, Points, Rectangle};
use ratatui::widgets::{Block, Paragraph};
use rw_core::GeneratedMap;

use crate::display::{MarkerMode, Projection};
use crate::input::{Command, key_to_command};
use crate::theme::Theme;

/// How the viewer for a run was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Show the next run
    Next,
    /// Stop showing runs
    Quit,
}

/// Which run of how many, and the seed that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInfo {
    pub index: usize,
    pub total: usize,
    pub seed: u64,
}

/// Viewer state for one generated layout
pub struct MapView {
    map: GeneratedMap,
    projection: Projection,
    run: RunInfo,
    theme: Theme,
    marker: MarkerMode,
    show_anchors: bool,
    outcome: Option<ViewOutcome>,
}

impl MapView {
    pub fn new(map: GeneratedMap, canvas: (i32, i32), run: RunInfo, theme: Theme) -> Self {
        Self {
            map,
            projection: Projection::new(canvas.0, canvas.1),
            run,
            theme,
            marker: MarkerMode::default(),
            show_anchors: true,
            outcome: None,
        }
    }

    pub fn with_marker(mut self, marker: MarkerMode) -> Self {
        self.marker = marker;
        self
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    pub fn marker(&self) -> MarkerMode {
        self.marker
    }

    pub fn show_anchors(&self) -> bool {
        self.show_anchors
    }

    /// Set once the user has asked to leave this layout
    pub fn outcome(&self) -> Option<ViewOutcome> {
        self.outcome
    }

    /// Handle an input event, returning the command it mapped to
    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        let command = key_to_command(key)?;
        self.execute(command);
        Some(command)
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Next => self.outcome = Some(ViewOutcome::Next),
            Command::Quit => self.outcome = Some(ViewOutcome::Quit),
            Command::ToggleAnchors => self.show_anchors = !self.show_anchors,
            Command::CycleMarker => {
                self.marker = match self.marker {
                    MarkerMode::Braille => MarkerMode::Dot,
                    MarkerMode::Dot => MarkerMode::Block,
                    MarkerMode::Block => MarkerMode::HalfBlock,
                    MarkerMode::HalfBlock => MarkerMode::Braille,
                };
            }
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut Frame) {
        // Layout: map on top, one status line below
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let title = format!(" run {}/{} ", self.run.index + 1, self.run.total);
        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(self.theme.border)),
            )
            .marker(self.marker.into())
            .x_bounds(self.projection.x_bounds())
            .y_bounds(self.projection.y_bounds())
            .paint(|ctx| self.paint(ctx));
        frame.render_widget(canvas, chunks[0]);

        frame.render_widget(Paragraph::new(self.status_line()), chunks[1]);
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        for room in &self.map.rooms {
            let (x, y, width, height) = self.projection.rect(&room.rect);
            ctx.draw(&Rectangle {
                x,
                y,
                width,
                height,
                color: self.theme.room,
            });
        }
        ctx.layer();

        for (from, to) in self.map.segments() {
            let (x1, y1) = self.projection.point(from);
            let (x2, y2) = self.projection.point(to);
            ctx.draw(&Segment {
                x1,
                y1,
                x2,
                y2,
                color: self.theme.corridor,
            });
        }

        if self.show_anchors {
            let coords: Vec<(f64, f64)> = self
                .map
                .rooms
                .iter()
                .map(|room| self.projection.point(room.anchor))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: self.theme.anchor,
            });
        }
    }

    /// Footer text: seed, counts, and key hints
    pub fn status_line(&self) -> Line<'static> {
        let summary = format!(
            "seed {} | {} rooms | {} connections | {} skipped",
            self.run.seed,
            self.map.rooms.len(),
            self.map.connections.len(),
            self.map.skipped,
        );
        Line::from(vec![
            Span::styled(summary, Style::default().fg(self.theme.text)),
            Span::styled(
                format!("   [n]ext [a]nchors [m]arker:{} [q]uit", self.marker),
                Style::default().fg(self.theme.text_dim),
            ),
        ])
    }
}

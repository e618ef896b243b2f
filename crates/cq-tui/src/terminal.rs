//! Terminal setup, teardown, and the fixed-rate play loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::PlayApp;

/// Take over the terminal for `colloquy play` and drive `app` at `tick_rate`.
///
/// The terminal is restored on the way out even when the loop fails.
pub fn run(mut app: PlayApp, tick_rate: Duration) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("cannot enter raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("cannot switch to the play screen: {e}"))?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| format!("cannot open the play screen: {e}"))?;

    let result = run_loop(&mut terminal, &mut app, tick_rate);

    let restored = disable_raw_mode()
        .and_then(|()| execute!(terminal.backend_mut(), LeaveAlternateScreen))
        .and_then(|()| terminal.show_cursor());
    result?;
    restored.map_err(|e| format!("cannot restore the terminal: {e}"))
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PlayApp,
    tick_rate: Duration,
) -> Result<(), String> {
    let mut last_tick = Instant::now();
    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .map_err(|e| format!("cannot draw the play screen: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).map_err(|e| format!("cannot read input: {e}"))? {
            match event::read().map_err(|e| format!("cannot read input: {e}"))? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            app.tick(elapsed);
            last_tick = Instant::now();
        }
    }
}

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &PlayApp) {
    let surface = app.session.surface();
    let visible_rows = surface.slots().iter().filter(|s| s.visible).count() as u16;
    let choice_height = if surface.container_visible() && visible_rows > 0 {
        visible_rows + 2
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Dialogue
            Constraint::Length(choice_height), // Choices
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    let block = Block::default()
        .title(format!(" {} ", app.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    if surface.panel_visible() {
        let text = Paragraph::new(surface.text())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(text, chunks[0]);
    } else {
        let idle = Paragraph::new(Span::styled(
            "The conversation is over.",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        frame.render_widget(idle, chunks[0]);
    }

    if choice_height > 0 {
        let items: Vec<ListItem> = surface
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.visible)
            .map(|(i, slot)| {
                let focused = surface.focus() == Some(i);
                let marker = if focused { "> " } else { "  " };
                let style = if focused {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Span::styled(
                    format!("{marker}{}. {}", i + 1, slot.text),
                    style,
                ))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(" Choices ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(list, chunks[1]);
    }

    let mut spans = vec![Span::raw(app.status_hint())];
    if let Some(cue) = surface.flashing_cue() {
        spans.push(Span::styled(
            format!("  [{cue}]"),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  {status}"),
            Style::default().fg(Color::Red),
        ));
    }
    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[2]);
}

//! Top-level render function
//!
//! Draws the shared header, the current screen's body, its footer, and the
//! status line.

use crate::screens::{Footer, Screen, StatusLevel, StatusMessage};
use crate::session::Session;
use crate::ui::layout::calculate_layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Render one frame
pub fn render(
    frame: &mut Frame,
    screen: &Screen,
    session: &Session,
    status: Option<&StatusMessage>,
    theme: &Theme,
) {
    let layout = calculate_layout(frame.area());

    render_header(frame, layout.header, session, theme);
    screen.render_body(frame, layout.body, theme);
    render_footer(frame, layout.footer, &screen.footer(), theme);
    render_status(frame, layout.status, status, theme);
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(session.version_line(), theme.header_version)),
        Line::from(Span::styled(
            session.connection_line(),
            theme.header_connection,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect, footer: &Footer, theme: &Theme) {
    let paragraph = match footer {
        Footer::Hint(hint) => Paragraph::new(*hint).style(theme.hint),
        Footer::Prompt(prompt) => Paragraph::new(prompt.as_str()).style(theme.confirm_prompt),
    };
    frame.render_widget(paragraph.wrap(Wrap { trim: true }), area);
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>, theme: &Theme) {
    let Some(status) = status else {
        return;
    };
    let style = match status.level {
        StatusLevel::Info => theme.status_info,
        StatusLevel::Success => theme.status_success,
        StatusLevel::Warning => theme.status_warning,
        StatusLevel::Error => theme.status_error,
    };
    frame.render_widget(Paragraph::new(status.message.as_str()).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{InfoScreen, MenuScreen};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(screen: &Screen, status: Option<&StatusMessage>) -> String {
        let session = Session::new("16.2", "postgres@db:5432/app");
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
        terminal
            .draw(|f| render(f, screen, &session, status, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for line in buffer.content.chunks(buffer.area.width as usize) {
            for cell in line {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_menu_frame() {
        let out = draw(&Screen::Menu(MenuScreen::new()), None);
        assert!(out.contains("PostgreSQL Version: 16.2"));
        assert!(out.contains("Connected to: postgres@db:5432/app"));
        assert!(out.contains("What do you want to do?"));
        assert!(out.contains("> Check Version"));
        assert!(out.contains("  Blocked Queries"));
        assert!(out.contains("Press q to quit."));
    }

    #[test]
    fn test_status_line_shown() {
        let status = StatusMessage {
            message: "Dropped replication slot 'slot_a'".into(),
            level: StatusLevel::Success,
        };
        let out = draw(&Screen::Info(InfoScreen::new("x")), Some(&status));
        assert!(out.contains("Dropped replication slot 'slot_a'"));
        assert!(out.contains("Press q to return to the menu."));
    }
}

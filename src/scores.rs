use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::model::HighScores;
use crate::util::{center_rect, get_display_area};
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect, Size},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};
use unicode_width::UnicodeWidthStr;

/// The screen listing the recorded high scores
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct HighScoresScreen;

impl HighScoresScreen {
    pub(crate) fn handle_event(self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Enter | Command::Esc | Command::B | Command::M => {
                Some(Screen::Main(MainMenu::new()))
            }
            Command::Q | Command::Quit => Some(Screen::Quit),
            _ => None,
        }
    }
}

/// Widget drawing the high score table
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoreTable<'a>(pub(crate) &'a HighScores);

impl ScoreTable<'_> {
    const RANK_WIDTH: usize = 4;
    const SCORE_WIDTH: usize = 8;
    const GUTTER: &'static str = "  ";
    #[allow(clippy::cast_possible_truncation)]
    const TEXT_WIDTH: u16 =
        (Self::RANK_WIDTH + 2 * Self::GUTTER.len() + consts::MAX_NAME_WIDTH + Self::SCORE_WIDTH)
            as u16;
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = consts::MAX_HIGH_SCORES as u16 + 4;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    fn header() -> String {
        Self::row("Rank", "Name", "Score")
    }

    fn row(rank: &str, name: &str, score: &str) -> String {
        let pad = consts::MAX_NAME_WIDTH.saturating_sub(name.width());
        format!(
            "{rank:>rwidth$}{gutter}{name}{space:pad$}{gutter}{score:>swidth$}",
            rwidth = Self::RANK_WIDTH,
            gutter = Self::GUTTER,
            space = "",
            swidth = Self::SCORE_WIDTH,
        )
    }
}

impl Widget for ScoreTable<'_> {
    /*
     * ┌────────── HIGH SCORES ───────────┐
     * │                                  │
     * │ Rank  Name                 Score │
     * │    1  Alice                  120 │
     * │    2  Bob                     80 │
     * ...
     * └──────────────────────────────────┘
     */

    // `area` is the area of the entire terminal
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [table_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(display);
        let block_area = center_rect(
            table_area,
            Size {
                width: Self::WIDTH,
                height: Self::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" HIGH SCORES ")
            .title_alignment(Alignment::Center)
            .padding(Padding::new(1, 1, 1, 0));
        let inner = block.inner(block_area);
        block.render(block_area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Span::styled(Self::header(), consts::TABLE_HEADER_STYLE).render(row, buf);
        }
        if self.0.is_empty() {
            if let Some(row) = rows.next() {
                Line::from("No high scores yet!").centered().render(row, buf);
            }
        } else {
            for ((i, entry), row) in self.0.entries().iter().enumerate().zip(rows) {
                let rank = (i + 1).to_string();
                let score = entry.score.to_string();
                Span::raw(Self::row(&rank, &entry.name, &score)).render(row, buf);
            }
        }
        Line::from_iter([
            Span::raw(" Back ("),
            Span::styled("b", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use rstest::rstest;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[rstest]
    #[case(KeyCode::Enter)]
    #[case(KeyCode::Esc)]
    #[case(KeyCode::Char('m'))]
    #[case(KeyCode::Char('b'))]
    fn back_to_menu(#[case] code: KeyCode) {
        assert!(matches!(
            HighScoresScreen.handle_event(Event::Key(code.into())),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn quit() {
        assert!(matches!(
            HighScoresScreen.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(Screen::Quit)
        ));
        assert!(HighScoresScreen
            .handle_event(Event::Key(KeyCode::Char('x').into()))
            .is_none());
    }

    #[test]
    fn render_empty() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        ScoreTable(&HighScores::in_memory()).render(area, &mut buffer);
        let text = (0..30).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        assert!(text.iter().any(|r| r.contains(" HIGH SCORES ")));
        assert!(text.iter().any(|r| r.contains("No high scores yet!")));
        assert_eq!(text[29].trim_end(), " Back (b) — Quit (q)");
    }

    #[test]
    fn render_entries() {
        let mut scores = HighScores::in_memory();
        scores.insert_at("Alice", 120, 1);
        scores.insert_at("漢字", 40, 2);
        scores.insert_at("Bob", 80, 3);
        let area = Rect::new(0, 0, 80, 30);
        let mut buffer = Buffer::empty(area);
        ScoreTable(&scores).render(area, &mut buffer);
        let text = (0..30).map(|y| row_text(&buffer, y)).collect::<Vec<_>>();
        let header = text
            .iter()
            .position(|r| r.contains("Rank  Name"))
            .unwrap();
        assert_eq!(
            text[header].trim(),
            "│ Rank  Name                 Score │"
        );
        assert_eq!(
            text[header + 1].trim(),
            "│    1  Alice                  120 │"
        );
        assert_eq!(
            text[header + 2].trim(),
            "│    2  Bob                     80 │"
        );
        // Double-width names are padded by display width
        assert!(text[header + 3].contains("   3  漢"));
        assert!(text[header + 3].trim_end().ends_with("  40 │"));
        assert_eq!(text[header + 3].matches('│').count(), 2);
    }
}

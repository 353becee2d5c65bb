use crate::command::Command;
use crate::util::{center_rect, ErrorChain};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A pop-up reporting a problem the program recovered from, such as an
/// unusable configuration file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: usize = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn from_error(e: &dyn Error) -> Warning {
        Warning::from_messages(ErrorChain(e).messages())
    }

    fn from_messages(msgs: Vec<String>) -> Warning {
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        if let Some(first) = msgs.next() {
            let opts = textwrap::Options::new(width).break_words(true);
            lines.extend(textwrap::wrap(&first, opts).into_iter().map(Cow::into_owned));
        }
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            for (i, m) in causes.iter().enumerate() {
                let init_indent = if causes.len() > 1 {
                    format!("{i:>5}: ")
                } else {
                    String::from("    ")
                };
                let sub_indent = " ".repeat(init_indent.len());
                let opts = textwrap::Options::new(width)
                    .break_words(true)
                    .initial_indent(&init_indent)
                    .subsequent_indent(&sub_indent);
                lines.extend(textwrap::wrap(m, opts).into_iter().map(Cow::into_owned));
            }
        }
        lines.truncate(Warning::MAX_LINES);
        Warning { lines }
    }

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_single_cause() {
        let warning = Warning::from_messages(vec![
            String::from("failed to parse configuration file"),
            String::from("board width must be between 10 and 200, got 3"),
        ]);
        let area = Rect::new(0, 0, 80, 12);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "              ┌──────────────────── WARNING ─────────────────────┐              ",
            "              │ failed to parse configuration file               │              ",
            "              │                                                  │              ",
            "              │ Caused by:                                       │              ",
            "              │     board width must be between 10 and 200, got  │              ",
            "              │     3                                            │              ",
            "              │                                                  │              ",
            "              │                       [OK]                       │              ",
            "              └──────────────────────────────────────────────────┘              ",
            "",
        ]);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn numbered_causes() {
        let warning = Warning::from_messages(vec![
            String::from("could not start"),
            String::from("high scores unreadable"),
            String::from("permission denied"),
        ]);
        assert_eq!(
            warning.lines,
            [
                "could not start",
                "",
                "Caused by:",
                "    0: high scores unreadable",
                "    1: permission denied",
            ]
        );
    }

    #[test]
    fn from_config_error() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[board]\nwidth = 3\n").unwrap();
        let e = Config::load(&path, true).unwrap_err();
        let warning = Warning::from_error(&e);
        assert_eq!(warning.lines[0], "failed to parse configuration file");
        assert_eq!(warning.lines[2], "Caused by:");
        assert!(warning.lines[3..]
            .iter()
            .any(|ln| ln.contains("board width must be")));
    }

    #[test]
    fn long_chains_are_cut() {
        let warning = Warning::from_messages((0..30).map(|i| format!("error {i}")).collect());
        assert_eq!(warning.lines.len(), 16);
    }

    #[test]
    fn commands() {
        let warning = Warning::from_messages(vec![String::from("oops")]);
        assert_eq!(
            warning.handle_command(Command::Enter),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Esc),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_command(Command::Quit),
            Some(WarningOutcome::Quit)
        );
        assert_eq!(warning.handle_command(Command::Up), None);
    }
}

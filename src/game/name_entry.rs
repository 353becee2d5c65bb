use crate::consts;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A pop-up asking the player for the name to record a high score under
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct NameEntry {
    score: u32,
    text: String,
    /// `true` until the player edits the prefilled default name; the first
    /// keystroke then replaces it
    pristine: bool,
    /// Set when the player tries to submit a blank name
    blank: bool,
}

impl NameEntry {
    pub(super) const HEIGHT: u16 = 8;
    pub(super) const WIDTH: u16 = 40;

    pub(super) fn new(score: u32) -> NameEntry {
        NameEntry {
            score,
            text: String::from(consts::DEFAULT_PLAYER_NAME),
            pristine: true,
            blank: false,
        }
    }

    /// Handle an input event.  Returns `Some` once the player is done with
    /// the pop-up.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<NameOutcome> {
        let ev = event.as_key_press_event()?;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(NameOutcome::Quit),
            (_, KeyCode::Enter) => {
                let name = self.text.trim();
                if name.is_empty() {
                    self.blank = true;
                } else {
                    return Some(NameOutcome::Submit(name.to_owned()));
                }
            }
            (_, KeyCode::Esc) => {
                return Some(NameOutcome::Submit(String::from(
                    consts::DEFAULT_PLAYER_NAME,
                )))
            }
            (_, KeyCode::Backspace) => {
                if self.pristine {
                    self.text.clear();
                } else if let Some((i, _)) = self.text.grapheme_indices(true).next_back() {
                    self.text.truncate(i);
                }
                self.pristine = false;
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) if !c.is_control() => {
                if self.pristine {
                    self.text.clear();
                    self.pristine = false;
                }
                let width = self.text.width() + c.width().unwrap_or(0);
                if width <= consts::MAX_NAME_WIDTH {
                    self.text.push(c);
                    self.blank = false;
                }
            }
            _ => (),
        }
        None
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum NameOutcome {
    /// Record the high score under the given name
    Submit(String),
    Quit,
}

impl Widget for &NameEntry {
    /*
     * ┌─────────── New High Score! ──────────┐
     * │ Congratulations!                     │
     * │ You achieved a high score of 120!    │
     * │                                      │
     * │ Name: Player                         │
     * │                                      │
     * │ Enter: save  Esc: save as Player     │
     * └──────────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" New High Score! ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let hint = if self.blank {
            Line::from("Please enter a name.")
        } else {
            Line::from_iter([
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(": save  "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(format!(": save as {}", consts::DEFAULT_PLAYER_NAME)),
            ])
        };
        let lines = [
            Line::from("Congratulations!"),
            Line::from(format!("You achieved a high score of {}!", self.score)),
            Line::default(),
            Line::from_iter([
                Span::raw("Name: "),
                Span::styled(self.text.as_str(), consts::INPUT_STYLE),
            ]),
            Line::default(),
            hint,
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

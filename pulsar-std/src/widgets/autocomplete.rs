//! Autocomplete suggestions with keyboard navigation.
//!
//! [`Autocomplete`] holds the candidate list and the state of one input
//! field: what was typed, the open dropdown and the focused suggestion. The
//! host forwards input changes to [`Autocomplete::show`] and key presses to
//! [`Autocomplete::key`], then renders [`Autocomplete::dropdown`].

use super::escape_html;
use regex::RegexBuilder;
use tracing::warn;

const DEFAULT_LIMIT: usize = 5;

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move focus to the next suggestion.
    Down,
    /// Move focus to the previous suggestion.
    Up,
    /// Select the focused suggestion.
    Enter,
    /// Close the dropdown.
    Escape,
    /// Close the dropdown.
    Tab,
}

/// One listed suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The candidate text.
    pub text: String,
    /// Escaped markup with the matched part wrapped in `<strong>`.
    pub html: String,
}

/// The open suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dropdown {
    /// Listed suggestions, at most the configured limit.
    pub items: Vec<Suggestion>,
    /// Summary of what was not listed, if anything.
    pub footer: Option<String>,
}

impl Dropdown {
    fn footer_for(matched: usize, limit: usize) -> Option<String> {
        if matched == 0 {
            return Some("No matching items".to_owned());
        }
        match matched.saturating_sub(limit) {
            0 => None,
            1 => Some("1 more item".to_owned()),
            more => Some(format!("{more} more items")),
        }
    }
}

/// Autocomplete state for one input field.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    candidates: Vec<String>,
    limit: usize,
    input: String,
    dropdown: Option<Dropdown>,
    focus: Option<usize>,
}

impl Autocomplete {
    /// Create an autocomplete over `candidates`.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            limit: DEFAULT_LIMIT,
            input: String::new(),
            dropdown: None,
            focus: None,
        }
    }

    /// Set how many suggestions are listed.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Index of the focused suggestion.
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// The open dropdown.
    pub fn dropdown(&self) -> Option<&Dropdown> {
        self.dropdown.as_ref()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.dropdown.is_some()
    }

    /// Update the input and open the dropdown with matching suggestions.
    pub fn show(&mut self, input: &str) -> &Dropdown {
        self.input = input.trim().to_owned();
        self.focus = None;

        let pattern = format!(r"\b({})", regex::escape(&self.input));
        let dropdown = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => {
                let mut items = Vec::new();
                let mut matched = 0;
                for candidate in &self.candidates {
                    let Some(m) = re.find(candidate) else {
                        continue;
                    };
                    matched += 1;
                    if items.len() < self.limit {
                        items.push(Suggestion {
                            text: candidate.clone(),
                            html: format!(
                                "{}<strong>{}</strong>{}",
                                escape_html(&candidate[..m.start()]),
                                escape_html(m.as_str()),
                                escape_html(&candidate[m.end()..])
                            ),
                        });
                    }
                }
                Dropdown {
                    items,
                    footer: Dropdown::footer_for(matched, self.limit),
                }
            }
            Err(err) => {
                warn!(input = %self.input, error = %err, "autocomplete pattern rejected");
                Dropdown {
                    items: Vec::new(),
                    footer: Dropdown::footer_for(0, self.limit),
                }
            }
        };
        self.dropdown.insert(dropdown)
    }

    /// Handle a key press. Returns the selected text when `key` selects one.
    pub fn key(&mut self, key: Key) -> Option<String> {
        let len = self.dropdown.as_ref().map_or(0, |d| d.items.len());
        match key {
            Key::Down => {
                if len > 0 {
                    self.focus = Some(self.focus.map_or(0, |i| (i + 1) % len));
                }
                None
            }
            Key::Up => {
                if len > 0 {
                    self.focus = Some(match self.focus {
                        None | Some(0) => len - 1,
                        Some(i) => i - 1,
                    });
                }
                None
            }
            Key::Enter => {
                let selected = self.dropdown.as_ref().and_then(|d| match self.focus {
                    Some(i) => d.items.get(i),
                    None if d.items.len() == 1 => d.items.first(),
                    None => None,
                });
                let selected = selected.map(|s| s.text.clone());
                if selected.is_some() {
                    self.input.clear();
                }
                self.close();
                selected
            }
            Key::Escape | Key::Tab => {
                self.close();
                None
            }
        }
    }

    /// Select the suggestion at `index` and put it in the input.
    pub fn click(&mut self, index: usize) -> Option<String> {
        let text = self
            .dropdown
            .as_ref()
            .and_then(|d| d.items.get(index))
            .map(|s| s.text.clone())?;
        self.input.clone_from(&text);
        self.close();
        Some(text)
    }

    /// Close the dropdown and drop the focus.
    pub fn close(&mut self) {
        self.dropdown = None;
        self.focus = None;
    }
}

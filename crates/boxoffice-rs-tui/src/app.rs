//! Application state and key handling for the box-office TUI.

use boxoffice_rs_client::SubmissionError;
use boxoffice_rs_core::{
    DashboardSummary, DraftEdit, FormController, FormState, ListField,
};
use boxoffice_rs_model::{
    ContentRating, Country, Genre, InputFields, Language, PredictedFields, PredictionRecord,
    Vocabulary,
};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_INPUT_LEN: usize = 10;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Form,
    History,
}

/// Editable row on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    FilmingLocation,
    Director,
    Duration,
    Budget,
    ContentRating,
    ReleaseDate,
    Genres,
    Languages,
    Countries,
    Stars,
    Writers,
    ProductionCompanies,
}

impl FormField {
    pub const ALL: [FormField; 14] = [
        FormField::Title,
        FormField::Description,
        FormField::FilmingLocation,
        FormField::Director,
        FormField::Duration,
        FormField::Budget,
        FormField::ContentRating,
        FormField::ReleaseDate,
        FormField::Genres,
        FormField::Languages,
        FormField::Countries,
        FormField::Stars,
        FormField::Writers,
        FormField::ProductionCompanies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::FilmingLocation => "Filming location",
            FormField::Director => "Director *",
            FormField::Duration => "Duration (min) *",
            FormField::Budget => "Budget (USD) *",
            FormField::ContentRating => "Content rating *",
            FormField::ReleaseDate => "Release date *",
            FormField::Genres => "Genres",
            FormField::Languages => "Languages",
            FormField::Countries => "Countries",
            FormField::Stars => "Stars",
            FormField::Writers => "Writers",
            FormField::ProductionCompanies => "Production companies",
        }
    }

    pub fn list(self) -> Option<ListField> {
        match self {
            FormField::Stars => Some(ListField::Stars),
            FormField::Writers => Some(ListField::Writers),
            FormField::ProductionCompanies => Some(ListField::ProductionCompanies),
            _ => None,
        }
    }

    /// Number of selectable items for fields with a horizontal cursor.
    fn vocabulary_len(self) -> Option<usize> {
        match self {
            FormField::Genres => Some(Genre::ALL.len()),
            FormField::Languages => Some(Language::ALL.len()),
            FormField::Countries => Some(Country::ALL.len()),
            _ => None,
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    /// Send this input to the prediction service.
    Submit(InputFields),
}

/// Top-level application state for the TUI.
pub struct App {
    /// Current screen.
    pub view: View,
    /// Form state machine and history access.
    pub controller: FormController,
    /// Index of the focused form row.
    pub field: usize,
    /// Horizontal cursor within the focused row (vocabulary item or list slot).
    pub cursor: usize,
    /// Raw text of the release date row.
    pub date_input: String,
    /// Cached history, most recent first.
    pub history: Vec<PredictionRecord>,
    /// Cached dashboard aggregates.
    pub summary: DashboardSummary,
    /// Selected row in the history view.
    pub selected_record: usize,
    /// Status line text.
    pub status: String,
    /// Prediction endpoint shown in the header.
    pub endpoint: String,
}

impl App {
    /// Create the app on the dashboard with history loaded.
    pub fn new(controller: FormController, endpoint: impl Into<String>) -> Self {
        let date_input = format_date(controller.draft().release_date());
        let mut app = Self {
            view: View::Dashboard,
            controller,
            field: 0,
            cursor: 0,
            date_input,
            history: Vec::new(),
            summary: DashboardSummary::default(),
            selected_record: 0,
            status: "ready".to_string(),
            endpoint: endpoint.into(),
        };
        app.refresh_history();
        app
    }

    /// Focused form row.
    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.field.min(FormField::ALL.len() - 1)]
    }

    /// Reload history and recompute the dashboard.
    pub fn refresh_history(&mut self) {
        self.history = self.controller.history();
        self.summary = DashboardSummary::from_records(&self.history);
        if self.selected_record >= self.history.len() {
            self.selected_record = self.history.len().saturating_sub(1);
        }
        debug!("history refreshed (records={})", self.history.len());
    }

    /// Switch screens.
    pub fn show(&mut self, view: View) {
        if view == View::Form && matches!(self.controller.state(), FormState::Succeeded { .. }) {
            if let Err(err) = self.controller.start_new() {
                warn!("failed to start a new draft: {err}");
            }
            self.reset_cursors();
        }
        if view != View::Form {
            self.refresh_history();
        }
        self.view = view;
    }

    fn reset_cursors(&mut self) {
        self.field = 0;
        self.cursor = 0;
        self.date_input = format_date(self.controller.draft().release_date());
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }
        match key.code {
            KeyCode::F(1) => {
                self.show(View::Dashboard);
                return KeyOutcome::Continue;
            }
            KeyCode::F(2) => {
                self.show(View::Form);
                return KeyOutcome::Continue;
            }
            KeyCode::F(3) => {
                self.show(View::History);
                return KeyOutcome::Continue;
            }
            _ => {}
        }
        match self.view {
            View::Form => self.handle_form_key(key),
            View::Dashboard | View::History => self.handle_browse_key(key),
        }
    }

    /// Keys on the read-only screens.
    fn handle_browse_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('d') => self.show(View::Dashboard),
            KeyCode::Char('n') => self.show(View::Form),
            KeyCode::Char('h') => self.show(View::History),
            KeyCode::Up if self.view == View::History => {
                self.selected_record = self.selected_record.saturating_sub(1);
            }
            KeyCode::Down if self.view == View::History => {
                if self.selected_record + 1 < self.history.len() {
                    self.selected_record += 1;
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.show(View::Dashboard);
                return KeyOutcome::Continue;
            }
            KeyCode::Char('s') if ctrl => return self.begin_submit(),
            KeyCode::Char('r') if ctrl => {
                match self.controller.reset() {
                    Ok(()) => {
                        self.reset_cursors();
                        self.status = "form reset".to_string();
                    }
                    Err(err) => self.status = err.to_string(),
                }
                return KeyOutcome::Continue;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.field = self.field.checked_sub(1).unwrap_or(FormField::ALL.len() - 1);
                self.cursor = 0;
                return KeyOutcome::Continue;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.field = (self.field + 1) % FormField::ALL.len();
                self.cursor = 0;
                return KeyOutcome::Continue;
            }
            _ => {}
        }
        if ctrl || key.modifiers.contains(KeyModifiers::ALT) {
            return KeyOutcome::Continue;
        }
        self.edit_focused(key.code);
        KeyOutcome::Continue
    }

    fn begin_submit(&mut self) -> KeyOutcome {
        if self.controller.is_submitting() {
            self.status = "a prediction is already in progress".to_string();
            return KeyOutcome::Continue;
        }
        match self.controller.begin_submit() {
            Ok(input) => {
                info!("prediction requested (title={})", input.title);
                self.status = "submitting…".to_string();
                KeyOutcome::Submit(input)
            }
            Err(err) => {
                self.status = err.to_string();
                KeyOutcome::Continue
            }
        }
    }

    /// Apply the prediction result delivered by the submit task.
    pub fn finish_submit(&mut self, result: Result<PredictedFields, SubmissionError>) {
        match self.controller.complete_submit(result) {
            Ok(record) => {
                self.status = format!("prediction saved for \"{}\"", record.input.title);
                self.selected_record = 0;
                self.show(View::History);
            }
            Err(err) => {
                self.status = format!("prediction failed: {err}");
            }
        }
    }

    fn edit(&mut self, edit: DraftEdit) -> bool {
        match self.controller.apply(edit) {
            Ok(_) => true,
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    fn edit_focused(&mut self, code: KeyCode) {
        let field = self.focused_field();
        let draft = self.controller.draft();
        match field {
            FormField::Title
            | FormField::Description
            | FormField::FilmingLocation
            | FormField::Director => {
                let current = match field {
                    FormField::Title => draft.title(),
                    FormField::Description => draft.description(),
                    FormField::FilmingLocation => draft.filming_location(),
                    _ => draft.director(),
                };
                let Some(value) = edit_text(current, code) else {
                    return;
                };
                let edit = match field {
                    FormField::Title => DraftEdit::SetTitle(value),
                    FormField::Description => DraftEdit::SetDescription(value),
                    FormField::FilmingLocation => DraftEdit::SetFilmingLocation(value),
                    _ => DraftEdit::SetDirector(value),
                };
                self.edit(edit);
            }
            FormField::Duration => {
                let Some(value) = edit_number(draft.duration().map(u64::from), code) else {
                    return;
                };
                // Digits past the u32 range are dropped like letters.
                let Ok(value) = value.map(u32::try_from).transpose() else {
                    return;
                };
                self.edit(DraftEdit::SetDuration(value));
            }
            FormField::Budget => {
                if let Some(value) = edit_number(draft.budget(), code) {
                    self.edit(DraftEdit::SetBudget(value));
                }
            }
            FormField::ContentRating => {
                let all = ContentRating::ALL;
                let position = all
                    .iter()
                    .position(|rating| *rating == draft.content_rating())
                    .unwrap_or(0);
                let next = match code {
                    KeyCode::Right | KeyCode::Char(' ') => (position + 1) % all.len(),
                    KeyCode::Left => position.checked_sub(1).unwrap_or(all.len() - 1),
                    _ => return,
                };
                self.edit(DraftEdit::SetContentRating(all[next]));
            }
            FormField::ReleaseDate => {
                let mut text = self.date_input.clone();
                match code {
                    KeyCode::Char(ch)
                        if (ch.is_ascii_digit() || ch == '-') && text.len() < DATE_INPUT_LEN =>
                    {
                        text.push(ch)
                    }
                    KeyCode::Backspace => {
                        text.pop();
                    }
                    _ => return,
                }
                let parsed = NaiveDate::parse_from_str(&text, DATE_FORMAT).ok();
                if self.edit(DraftEdit::SetReleaseDate(parsed)) {
                    self.date_input = text;
                }
            }
            FormField::Genres | FormField::Languages | FormField::Countries => {
                let len = field.vocabulary_len().unwrap_or(0);
                match code {
                    KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Right => {
                        if self.cursor + 1 < len {
                            self.cursor += 1;
                        }
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        let edit = match field {
                            FormField::Genres => Genre::ALL
                                .get(self.cursor)
                                .map(|genre| DraftEdit::ToggleGenre(*genre)),
                            FormField::Languages => Language::ALL
                                .get(self.cursor)
                                .map(|language| DraftEdit::ToggleLanguage(*language)),
                            _ => Country::ALL
                                .get(self.cursor)
                                .map(|country| DraftEdit::ToggleCountry(*country)),
                        };
                        if let Some(edit) = edit {
                            self.edit(edit);
                        }
                    }
                    _ => {}
                }
            }
            FormField::Stars | FormField::Writers | FormField::ProductionCompanies => {
                let Some(list) = field.list() else {
                    return;
                };
                let slots = draft.slots(list).len();
                match code {
                    KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
                    KeyCode::Right => {
                        if self.cursor + 1 < slots {
                            self.cursor += 1;
                        }
                    }
                    KeyCode::Char('+') => {
                        if self.edit(DraftEdit::AddSlot(list)) {
                            self.cursor = slots;
                        }
                    }
                    KeyCode::Delete => {
                        let index = self.cursor.min(slots.saturating_sub(1));
                        if self.edit(DraftEdit::RemoveSlot { list, index }) {
                            let remaining = self.controller.draft().slots(list).len();
                            self.cursor = self.cursor.min(remaining.saturating_sub(1));
                        }
                    }
                    code => {
                        let index = self.cursor.min(slots.saturating_sub(1));
                        let current = draft
                            .slots(list)
                            .get(index)
                            .map(String::as_str)
                            .unwrap_or_default();
                        if let Some(value) = edit_text(current, code) {
                            self.edit(DraftEdit::SetSlot { list, index, value });
                        }
                    }
                }
            }
        }
    }
}

/// Apply a typing key to free text.
fn edit_text(current: &str, code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(ch) => {
            let mut value = current.to_string();
            value.push(ch);
            Some(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            Some(value)
        }
        _ => None,
    }
}

/// Apply a typing key to a whole number; `Some(None)` clears the field.
fn edit_number(current: Option<u64>, code: KeyCode) -> Option<Option<u64>> {
    match code {
        KeyCode::Char(ch) => {
            let digit = u64::from(ch.to_digit(10)?);
            let next = current
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit))?;
            Some(Some(next))
        }
        KeyCode::Backspace => {
            let value = current?;
            Some(Some(value / 10).filter(|remaining| *remaining > 0))
        }
        _ => None,
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

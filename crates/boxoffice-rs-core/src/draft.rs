//! In-progress form state.
//!
//! A [`Draft`] is never mutated in place: [`Draft::apply`] returns a new draft
//! with the edit applied, so the previous value stays valid for the caller.

use crate::error::{FieldViolation, FormError};
use boxoffice_rs_model::{
    BUDGET_RANGE, ContentRating, Country, DURATION_RANGE, Genre, InputFields, Language,
    MAX_PRODUCTION_COMPANIES, MAX_STARS, MAX_WRITERS,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Duration preset on a fresh draft, in minutes.
pub const DEFAULT_DURATION: u32 = 90;
/// Budget preset on a fresh draft, in USD.
pub const DEFAULT_BUDGET: u64 = 1_000_000;

/// Bounded free-text list on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Stars,
    Writers,
    ProductionCompanies,
}

impl ListField {
    pub const ALL: [ListField; 3] = [
        ListField::Stars,
        ListField::Writers,
        ListField::ProductionCompanies,
    ];

    /// Maximum number of entries.
    pub fn max(self) -> usize {
        match self {
            ListField::Stars => MAX_STARS,
            ListField::Writers => MAX_WRITERS,
            ListField::ProductionCompanies => MAX_PRODUCTION_COMPANIES,
        }
    }

    /// Wire name of the list.
    pub fn wire_name(self) -> &'static str {
        match self {
            ListField::Stars => "stars",
            ListField::Writers => "writers",
            ListField::ProductionCompanies => "productionCompanies",
        }
    }
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListField::Stars => "stars",
            ListField::Writers => "writers",
            ListField::ProductionCompanies => "production companies",
        })
    }
}

/// A single change to a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    SetTitle(String),
    SetDescription(String),
    SetFilmingLocation(String),
    SetDirector(String),
    SetDuration(Option<u32>),
    SetBudget(Option<u64>),
    SetContentRating(ContentRating),
    SetReleaseDate(Option<NaiveDate>),
    ToggleGenre(Genre),
    ToggleLanguage(Language),
    ToggleCountry(Country),
    /// Replace the text of one list entry.
    SetSlot {
        list: ListField,
        index: usize,
        value: String,
    },
    /// Append an empty entry to a list.
    AddSlot(ListField),
    /// Remove one list entry; the last remaining entry is cleared instead.
    RemoveSlot { list: ListField, index: usize },
}

/// Unsaved form state.
///
/// Numeric and date fields are optional because the form can hold them
/// blank; [`Draft::validate`] reports them as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Draft {
    title: String,
    description: String,
    #[serde(rename = "filming_location")]
    filming_location: String,
    duration: Option<u32>,
    #[serde(rename = "mpaRating")]
    content_rating: ContentRating,
    release_date: Option<NaiveDate>,
    #[serde(deserialize_with = "distinct")]
    genres: Vec<Genre>,
    #[serde(deserialize_with = "distinct")]
    languages: Vec<Language>,
    #[serde(deserialize_with = "distinct")]
    countries: Vec<Country>,
    budget: Option<u64>,
    stars: Vec<String>,
    writers: Vec<String>,
    director: String,
    production_companies: Vec<String>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            filming_location: String::new(),
            duration: Some(DEFAULT_DURATION),
            content_rating: ContentRating::default(),
            release_date: Some(Local::now().date_naive()),
            genres: Vec::new(),
            languages: Vec::new(),
            countries: Vec::new(),
            budget: Some(DEFAULT_BUDGET),
            stars: vec![String::new()],
            writers: vec![String::new()],
            director: String::new(),
            production_companies: vec![String::new()],
        }
    }
}

impl Draft {
    /// Fresh draft with the form's preset values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn filming_location(&self) -> &str {
        &self.filming_location
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration
    }

    pub fn budget(&self) -> Option<u64> {
        self.budget
    }

    pub fn content_rating(&self) -> ContentRating {
        self.content_rating
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Entries of a bounded list, blanks included.
    pub fn slots(&self, list: ListField) -> &[String] {
        match list {
            ListField::Stars => &self.stars,
            ListField::Writers => &self.writers,
            ListField::ProductionCompanies => &self.production_companies,
        }
    }

    fn slots_mut(&mut self, list: ListField) -> &mut Vec<String> {
        match list {
            ListField::Stars => &mut self.stars,
            ListField::Writers => &mut self.writers,
            ListField::ProductionCompanies => &mut self.production_companies,
        }
    }

    /// Return a new draft with the edit applied.
    pub fn apply(&self, edit: DraftEdit) -> Result<Draft, FormError> {
        let mut next = self.clone();
        match edit {
            DraftEdit::SetTitle(value) => next.title = value,
            DraftEdit::SetDescription(value) => next.description = value,
            DraftEdit::SetFilmingLocation(value) => next.filming_location = value,
            DraftEdit::SetDirector(value) => next.director = value,
            DraftEdit::SetDuration(value) => next.duration = value,
            DraftEdit::SetBudget(value) => next.budget = value,
            DraftEdit::SetContentRating(value) => next.content_rating = value,
            DraftEdit::SetReleaseDate(value) => next.release_date = value,
            DraftEdit::ToggleGenre(value) => toggle(&mut next.genres, value),
            DraftEdit::ToggleLanguage(value) => toggle(&mut next.languages, value),
            DraftEdit::ToggleCountry(value) => toggle(&mut next.countries, value),
            DraftEdit::SetSlot { list, index, value } => {
                let slot = next
                    .slots_mut(list)
                    .get_mut(index)
                    .ok_or(FormError::SlotOutOfRange { list, index })?;
                *slot = value;
            }
            DraftEdit::AddSlot(list) => {
                let slots = next.slots_mut(list);
                if slots.len() >= list.max() {
                    return Err(FormError::ListFull {
                        list,
                        max: list.max(),
                    });
                }
                if slots.last().is_some_and(|last| last.trim().is_empty()) {
                    return Err(FormError::EmptyLastSlot(list));
                }
                slots.push(String::new());
            }
            DraftEdit::RemoveSlot { list, index } => {
                let slots = next.slots_mut(list);
                if index >= slots.len() {
                    return Err(FormError::SlotOutOfRange { list, index });
                }
                if slots.len() == 1 {
                    slots[0].clear();
                } else {
                    slots.remove(index);
                }
            }
        }
        Ok(next)
    }

    /// Check required fields and bounds, collecting every violation.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "required"));
        }
        if self.director.trim().is_empty() {
            violations.push(FieldViolation::new("director", "required"));
        }
        if self.release_date.is_none() {
            violations.push(FieldViolation::new("releaseDate", "required"));
        }
        match self.duration {
            None => violations.push(FieldViolation::new("duration", "required")),
            Some(duration) if !DURATION_RANGE.contains(&duration) => {
                violations.push(FieldViolation::new(
                    "duration",
                    format!(
                        "must be between {} and {} minutes",
                        DURATION_RANGE.start(),
                        DURATION_RANGE.end()
                    ),
                ));
            }
            Some(_) => {}
        }
        match self.budget {
            None => violations.push(FieldViolation::new("budget", "required")),
            Some(budget) if !BUDGET_RANGE.contains(&budget) => {
                violations.push(FieldViolation::new(
                    "budget",
                    format!(
                        "must be between {} and {} USD",
                        BUDGET_RANGE.start(),
                        BUDGET_RANGE.end()
                    ),
                ));
            }
            Some(_) => {}
        }
        for list in ListField::ALL {
            if self.slots(list).len() > list.max() {
                violations.push(FieldViolation::new(
                    list.wire_name(),
                    format!("at most {} entries", list.max()),
                ));
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(violations))
        }
    }

    /// Validate and convert into the payload sent to the service.
    ///
    /// Blank list entries are dropped.
    pub fn to_input(&self) -> Result<InputFields, FormError> {
        self.validate()?;
        let (Some(duration), Some(budget), Some(release_date)) =
            (self.duration, self.budget, self.release_date)
        else {
            return Err(FormError::Validation(Vec::new()));
        };
        Ok(InputFields {
            title: self.title.clone(),
            description: self.description.clone(),
            filming_location: self.filming_location.clone(),
            duration,
            content_rating: self.content_rating,
            release_date,
            genres: self.genres.clone(),
            languages: self.languages.clone(),
            countries: self.countries.clone(),
            budget,
            stars: non_blank(&self.stars),
            writers: non_blank(&self.writers),
            director: self.director.clone(),
            production_companies: non_blank(&self.production_companies),
        })
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, value: T) {
    if let Some(position) = items.iter().position(|item| *item == value) {
        items.remove(position);
    } else {
        items.push(value);
    }
}

/// Selections are sets: keep the first occurrence of each value.
fn distinct<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + PartialEq,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    Ok(unique)
}

fn non_blank(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.trim().is_empty())
        .cloned()
        .collect()
}

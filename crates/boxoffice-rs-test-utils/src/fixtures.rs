use boxoffice_rs_model::{
    ContentRating, Country, Genre, InputFields, Language, PredictedFields,
};
use chrono::NaiveDate;

/// Sanitized input for the reference scenario: "X" directed by "Y".
pub fn sample_input() -> InputFields {
    InputFields {
        title: "X".to_string(),
        description: String::new(),
        filming_location: String::new(),
        duration: 120,
        content_rating: ContentRating::Pg13,
        release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        genres: vec![Genre::Drama],
        languages: vec![Language::English],
        countries: vec![Country::UnitedStates],
        budget: 1_000_000,
        stars: vec!["A".to_string()],
        writers: vec!["B".to_string()],
        director: "Y".to_string(),
        production_companies: vec!["C".to_string()],
    }
}

/// Prediction returned by the reference scenario's service.
pub fn scenario_prediction() -> PredictedFields {
    PredictedFields {
        opening_weekend_gross: 200.0,
        gross_worldwide: 1000.0,
        awards: 1,
        nominations: 2,
        rating: 7.5,
        critic_score: 0.0,
    }
}

//! Built-in data used when nothing has been persisted yet

use crate::hackathon::types::Hackathon;
use chrono::NaiveDate;

/// Id of the seed hackathon
pub const SEED_HACKATHON_ID: &str = "1";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The single event a fresh install starts with
pub fn seed_hackathons() -> Vec<Hackathon> {
    vec![Hackathon {
        id: SEED_HACKATHON_ID.to_string(),
        title: "AI for Good Hackathon".to_string(),
        description: "Develop innovative AI solutions that address real-world challenges in \
                      healthcare, education, or sustainability."
            .to_string(),
        start_date: ymd(2023, 12, 1),
        end_date: ymd(2023, 12, 10),
        registration_deadline: ymd(2023, 11, 20),
        submission_deadline: ymd(2023, 12, 10),
        location: "Virtual".to_string(),
        prizes: vec![
            "$5,000 for 1st Place".to_string(),
            "$2,000 for 2nd Place".to_string(),
            "$1,000 for 3rd Place".to_string(),
        ],
        is_active: true,
    }]
}

//! Synthetic people for the benchmark dataset.
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use wirebench::entity::{Address, GetPopulationResponse, Person};

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Sam", "Drew", "Avery", "Quinn",
];
const LAST_NAMES: &[&str] = &[
    "White", "Miller", "Moore", "Jackson", "Martin", "Lee", "Perez", "Walker", "Hall", "Young",
];
const CITIES: &[&str] = &[
    "Seattle",
    "Portland",
    "San Francisco",
    "Los Angeles",
    "Denver",
    "Chicago",
    "Boston",
    "New York",
];
const STATES: &[&str] = &[
    "WA", "OR", "CA", "CO", "IL", "MA", "NY", "FL", "GA", "TX", "AZ", "NV",
];
const THEMES: &[&str] = &["light", "dark", "system"];
const ROLES: &[&str] = &["user", "manager", "admin"];
const LANGUAGES: &[&str] = &["en", "es"];
const STREETS: &[&str] = &["Oak", "Maple", "Pine", "Cedar", "Elm"];
const STREET_TYPES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Drive"];

/// 2024-01-01T10:00:00Z
const FIRST_CREATED_AT: i64 = 1_704_103_200;
/// Days between 1970-01-01 and 2000-01-01.
const BIRTH_DAYS_RANGE: u64 = 10_957;

/// Generates `size` people. Person `p001` is always the same fixed record.
pub fn generate_population<R: Rng>(
    size: usize,
    rng: &mut R,
) -> Result<GetPopulationResponse, time::error::Format> {
    let population = (1..=size)
        .map(|index| generate_person(index, rng))
        .collect::<Result<_, _>>()?;
    Ok(GetPopulationResponse { population })
}

fn generate_person<R: Rng>(index: usize, rng: &mut R) -> Result<Person, time::error::Format> {
    let id = format!("p{index:03}");
    let profile_image = format!("https://example.com/profiles/{id}.jpg");

    if index == 1 {
        return Ok(Person {
            id,
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            date_of_birth: "1985-03-15T00:00:00Z".to_string(),
            phone_number: "+1-555-123-4567".to_string(),
            address: Address {
                street: "123 Main Street".to_string(),
                city: "New York".to_string(),
                state: "NY".to_string(),
                country: "USA".to_string(),
                postal_code: "10001".to_string(),
            },
            created_at: "2024-01-01T10:00:00Z".to_string(),
            updated_at: "2024-01-01T10:00:00Z".to_string(),
            active: true,
            role: "user".to_string(),
            profile_image,
            preferences: preferences("dark", true, "en"),
        });
    }

    let first_name = pick(FIRST_NAMES, rng);
    let last_name = pick(LAST_NAMES, rng);

    let dob = OffsetDateTime::UNIX_EPOCH
        + Duration::from_secs(rng.gen_range(0..BIRTH_DAYS_RANGE) * 24 * 60 * 60);
    let created_at = OffsetDateTime::from_unix_timestamp(FIRST_CREATED_AT)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        + Duration::from_secs((index as u64 - 1) * 5 * 60);
    let created_at = created_at.format(&Rfc3339)?;

    Ok(Person {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{first_name}.{last_name}@example.com"),
        date_of_birth: dob.format(&Rfc3339)?,
        phone_number: format!(
            "+1-555-{:03}-{:04}",
            rng.gen_range(0..1000),
            rng.gen_range(0..10000)
        ),
        address: Address {
            street: format!(
                "{} {} {}",
                rng.gen_range(100..1000),
                pick(STREETS, rng),
                pick(STREET_TYPES, rng)
            ),
            city: pick(CITIES, rng).to_string(),
            state: pick(STATES, rng).to_string(),
            country: "USA".to_string(),
            postal_code: format!("{:05}", rng.gen_range(10000..100000)),
        },
        updated_at: created_at.clone(),
        created_at,
        active: rng.gen_bool(0.9),
        role: pick(ROLES, rng).to_string(),
        profile_image,
        preferences: preferences(pick(THEMES, rng), rng.gen_bool(0.7), pick(LANGUAGES, rng)),
    })
}

fn pick<'a, R: Rng>(choices: &[&'a str], rng: &mut R) -> &'a str {
    choices.choose(rng).copied().unwrap_or_default()
}

fn preferences(theme: &str, notifications: bool, language: &str) -> HashMap<String, serde_json::Value> {
    HashMap::from([
        ("theme".to_string(), json!(theme)),
        ("notifications".to_string(), json!(notifications)),
        ("language".to_string(), json!(language)),
    ])
}

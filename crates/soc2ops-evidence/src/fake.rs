//! Random value helpers for synthetic records

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use std::net::Ipv4Addr;
use uuid::{Builder, Uuid};

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David", "Elizabeth",
    "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah", "Carlos", "Karen",
    "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Priya", "Mark", "Aisha", "Kenji", "Sofia",
    "Omar", "Emily", "Andrew", "Mei", "Joshua", "Olivia", "Kevin", "Fatima", "Brian", "Hannah",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez", "Martinez",
    "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin",
    "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez", "Clark", "Nguyen", "Patel", "Kim",
    "Tanaka", "Okafor", "Schmidt", "Rossi", "Cohen", "Silva", "Walker", "Young", "Allen", "King",
];

const WORDS: &[&str] = &[
    "account", "access", "review", "policy", "system", "change", "control", "network", "server", "request",
    "report", "customer", "data", "backup", "service", "security", "update", "process", "team", "record",
    "approval", "window", "release", "incident", "alert", "vendor", "audit", "session", "token", "role",
    "support", "schedule", "deploy", "monitor", "migration", "ticket", "config", "finance", "quarter", "risk",
    "owner", "follow", "check", "verify", "restore", "rotate", "encrypt", "escalate", "document", "confirm",
];

/// Uniform pick from a non-empty slice
pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Random (version 4 layout) UUID drawn from `rng`, so seeded runs repeat
pub fn uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// Lowercase login such as `jsmith42`
pub fn user_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = pick(rng, FIRST_NAMES).to_lowercase();
    let last = pick(rng, LAST_NAMES).to_lowercase();
    match rng.gen_range(0..3) {
        0 => format!("{}.{}", first, last),
        1 => format!("{}{}", &first[..1], last),
        _ => format!("{}{}{}", first, last, rng.gen_range(1..100)),
    }
}

/// Public-looking IPv4 address (first octet 1..=223, never loopback)
pub fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    let mut first = rng.gen_range(1..=223u8);
    if first == 127 {
        first = 128;
    }
    Ipv4Addr::new(first, rng.gen(), rng.gen(), rng.gen_range(1..=254))
}

/// Filler prose of sentences, never longer than `max_chars`
pub fn text<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
    let mut out = String::new();
    loop {
        let sentence = sentence(rng);
        let needed = if out.is_empty() { sentence.len() } else { sentence.len() + 1 };
        if out.len() + needed > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&sentence);
    }

    if out.is_empty() {
        // Budget smaller than any sentence: single truncated word run.
        let mut fallback = sentence(rng);
        fallback.truncate(max_chars.saturating_sub(1));
        if !fallback.is_empty() {
            fallback.push('.');
        }
        return fallback;
    }
    out
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(3..=8);
    let mut words: Vec<String> = (0..len).map(|_| pick(rng, WORDS).to_string()).collect();
    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    format!("{}.", words.join(" "))
}

/// Uniform date in `[start, end]`; returns `start` when the range is empty
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    start + Duration::days(rng.gen_range(0..=span))
}

/// Uniform timestamp in `[start, end]` at second resolution
pub fn datetime_between<R: Rng + ?Sized>(rng: &mut R, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let span = (end - start).num_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..=span))
}

//! Keyword-cascade intent classifier.
//!
//! An ordered rule table, evaluated first-match-wins. The order is part of
//! the contract: queries frequently carry markers from several sets ("apply
//! for a training course" hits application, scheme and job markers) and only
//! the highest-priority match may govern routing.

use crate::types::{ConversationTurn, Intent, Role};

/// Unrelated-domain markers. A hit short-circuits the whole pipeline:
/// no retrieval, no generation.
const OFF_TOPIC: &[&str] = &[
    "weather", "movie", "film", "cricket", "football", "ipl", "song", "music",
    "recipe", "cooking", "horoscope", "astrology", "lottery", "joke", "shopping",
];

/// Application-intent markers; disambiguated into scheme vs job via history.
const APPLICATION: &[&str] = &[
    "apply", "applying", "register", "registration", "enroll", "enrol", "sign up",
];

/// Scheme/training markers. Also the context terms the application rule
/// looks for in recent assistant turns.
const SCHEME: &[&str] = &[
    "scheme", "yojana", "subsidy", "benefit", "welfare", "training", "skill",
    "course", "rozgar", "program",
];

const JOB: &[&str] = &[
    "job", "jobs", "employment", "vacancy", "vacancies", "hiring", "recruitment",
    "career", "salary", "naukri", "posting", "position",
];

const STATUS: &[&str] = &[
    "status", "application", "applied", "submitted", "pending", "approved",
    "rejected", "track",
];

/// Matched against whole tokens (and phrases), not substrings: "hi" must not
/// fire inside "chandigarh".
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "namaste", "greetings"];
const GREETING_PHRASES: &[&str] = &["good morning", "good afternoon", "good evening", "sat sri akal"];

/// Assistant turns the application rule inspects, newest first.
const CONTEXT_WINDOW: usize = 4;

struct Rule {
    applies: fn(&str) -> bool,
    resolve: fn(&str, &[ConversationTurn]) -> Intent,
}

const RULES: &[Rule] = &[
    Rule { applies: is_off_topic, resolve: |_, _| Intent::OffTopic },
    Rule { applies: is_application, resolve: resolve_application },
    Rule { applies: is_scheme, resolve: |_, _| Intent::SearchScheme },
    Rule { applies: is_job, resolve: |_, _| Intent::SearchJob },
    Rule { applies: is_status, resolve: |_, _| Intent::CheckStatus },
    Rule { applies: is_greeting, resolve: |_, _| Intent::GeneralQuery },
];

/// Classify a query, consulting recent history for context-sensitive rules.
/// Blank input and no-match both default to `general_query`; this never
/// fails on malformed input.
pub fn classify(query: &str, history: &[ConversationTurn]) -> Intent {
    let text = query.trim().to_lowercase();
    if text.is_empty() {
        return Intent::GeneralQuery;
    }
    for rule in RULES {
        if (rule.applies)(&text) {
            let intent = (rule.resolve)(&text, history);
            tracing::debug!(query, intent = intent.as_str(), "classified");
            return intent;
        }
    }
    tracing::debug!(query, intent = "general_query", "classified (default)");
    Intent::GeneralQuery
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn is_off_topic(text: &str) -> bool {
    contains_any(text, OFF_TOPIC)
}

fn is_application(text: &str) -> bool {
    contains_any(text, APPLICATION)
}

fn is_scheme(text: &str) -> bool {
    contains_any(text, SCHEME)
}

fn is_job(text: &str) -> bool {
    contains_any(text, JOB)
}

fn is_status(text: &str) -> bool {
    contains_any(text, STATUS)
}

fn is_greeting(text: &str) -> bool {
    if GREETING_PHRASES.iter().any(|p| text.contains(p)) {
        return true;
    }
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|t| GREETING_WORDS.contains(&t))
}

/// "apply"-style queries are about a scheme when either the query itself or
/// one of the assistant's recent turns carries scheme vocabulary; otherwise
/// the user is applying for a job.
fn resolve_application(text: &str, history: &[ConversationTurn]) -> Intent {
    if contains_any(text, SCHEME) {
        return Intent::SchemeApplication;
    }
    let scheme_context = history
        .iter()
        .rev()
        .filter(|turn| turn.role == Role::Assistant)
        .take(CONTEXT_WINDOW)
        .any(|turn| contains_any(&turn.content.to_lowercase(), SCHEME));
    if scheme_context {
        Intent::SchemeApplication
    } else {
        Intent::JobApplication
    }
}

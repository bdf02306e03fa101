use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};

pub const REFERENCE_PREFIX: &str = "CC";
const SUFFIX_LEN: usize = 9;

/// Fabricates a transaction reference: `CC-<unix millis>-<9 alphanumerics>`, uppercased.
pub fn generate_reference() -> String {
    build_reference(Utc::now().timestamp_millis(), &random_suffix())
}

fn build_reference(millis: i64, suffix: &str) -> String {
    format!("{REFERENCE_PREFIX}-{millis}-{suffix}").to_uppercase()
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

// Record id generation
use rand::distributions::Alphanumeric;
use rand::Rng;

const SUFFIX_LEN: usize = 8;

pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}_{}", prefix, suffix)
}

pub fn dashboard_id() -> String {
    generate_id("dashboard")
}

pub fn chart_id() -> String {
    generate_id("chart")
}

pub fn chart_data_id() -> String {
    generate_id("chart_data")
}

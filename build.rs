fn main() {
    // Only emit the ESP-IDF link environment for on-device builds; host
    // test builds (no `espidf` feature) skip it entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}

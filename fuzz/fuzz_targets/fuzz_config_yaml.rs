#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz config file loading.
///
/// Writes arbitrary bytes to a temporary config file and loads it, then
/// runs validation over whatever parsed.
fuzz_target!(|data: &[u8]| {
    let path = std::env::temp_dir().join(format!("gbp-score-fuzz-{}.yaml", std::process::id()));
    if std::fs::write(&path, data).is_ok() {
        if let Ok(config) = gbp_score::config::load_config_file(&path) {
            use gbp_score::config::Validatable;
            let _ = config.validate();
        }
    }
});

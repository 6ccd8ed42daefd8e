use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` output through the test harness; honours `RUST_LOG`.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .parse_default_env()
            .is_test(true)
            .try_init();
    });
}

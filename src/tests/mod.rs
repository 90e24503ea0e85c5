mod test_data;
mod test_distortion;
mod test_metric;

pub const TEST_SEED: u64 = 128;

/// Installs `env_logger` once for the whole test binary.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}


/// Prints the crate's rotation and rebalancing events when `RUST_LOG` asks for them, e.g.
/// `RUST_LOG=bst_variants=trace`.
pub(crate) fn init_tracing() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

mod request_encode;
mod util;

use std::sync::Once;

static INIT: Once = Once::new();

pub(crate) fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("runlog=trace,info")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

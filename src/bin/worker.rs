use std::env;

use pow_ledger::worker::{DEFAULT_BASE_URL, Worker};

fn main() {
    env_logger::init();

    let base_url = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    println!("⛏️ Mining against {base_url}");

    let mut worker = Worker::new(base_url);
    worker.run();
}

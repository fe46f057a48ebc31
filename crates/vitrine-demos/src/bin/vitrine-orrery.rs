use vitrine_demos::orrery::{self, OrreryConfig};
use vitrine_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = orrery::run(OrreryConfig::default()) {
        eprintln!("vitrine-orrery: {e:#}");
        std::process::exit(1);
    }
}

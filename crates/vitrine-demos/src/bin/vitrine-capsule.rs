use vitrine_demos::capsule_viewer::{self, CapsuleViewerConfig};
use vitrine_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = capsule_viewer::run(CapsuleViewerConfig::default()) {
        eprintln!("vitrine-capsule: {e:#}");
        std::process::exit(1);
    }
}

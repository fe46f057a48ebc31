use vitrine_demos::logo::{self, LogoConfig};
use vitrine_engine::logging::{init_logging, LoggingConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = logo::run(LogoConfig::default()) {
        eprintln!("vitrine-logo: {e:#}");
        std::process::exit(1);
    }
}

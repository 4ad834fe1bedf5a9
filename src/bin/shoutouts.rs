use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(env).with_writer(std::io::stderr).init();

    if let Err(err) = shoutouts::cli::run(std::env::args_os()) {
        eprintln!("shoutouts: {err:#}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(e) = shoutouts::sample::run(std::env::args_os()) {
        eprintln!("failed to write sample workbook: {e:#}");
        std::process::exit(1);
    }
}

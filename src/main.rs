fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = bank_ledger::app::run(std::env::args()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

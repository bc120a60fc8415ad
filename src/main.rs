fn main() {
    if let Err(err) = network_backdrop::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

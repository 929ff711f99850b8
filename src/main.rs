fn main() {
    if let Err(err) = quick_eda::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

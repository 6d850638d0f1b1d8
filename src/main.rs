fn main() {
    if let Err(e) = palaver::cli::main() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

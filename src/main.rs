fn main() {
    if let Err(err) = attack_arc::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

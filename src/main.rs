fn main() {
    docbuild::app::cli::run();
}

fn main() -> std::process::ExitCode {
    laas::run()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    nexbot::cli::main()
}

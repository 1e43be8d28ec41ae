fn main() {
    // Failures are reported on stdout, not signalled through the exit status.
    if let Err(err) = population_reconciler::run() {
        println!("Error during update: {err:#}");
    }
}

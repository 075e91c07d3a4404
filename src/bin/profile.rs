use mazegen::{Algorithm, GenerationRequest, Tuning};

/// Generate large mazes in a loop without any output, for profiling runs.
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100);

    let request = GenerationRequest {
        width: 255,
        height: 255,
        entry: (1, 1),
        exit: (253, 253),
        perfect: true,
        algorithm: Algorithm::Backtracker,
        seed: None,
        symbol: false,
        tuning: Tuning::default(),
    };
    for _ in 0..iterations {
        mazegen::generate(&request).expect("generation failed");
    }
}

#![no_main]

use applyprof::accumulator::Dimension;
use applyprof::pipeline::analyze;
use applyprof::report::rank;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte sequence must decode, fold and rank without panicking
    let analysis = analyze(data);
    for dimension in Dimension::ALL {
        let _ = rank(analysis.accumulator.dimension(dimension), 10);
    }
    let _ = analysis.to_text(10);
});

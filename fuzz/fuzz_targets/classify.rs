#![no_main]

use arbitrary::Arbitrary;
use arcana_testenv::{DiscoveryRules, Expectation};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    prefix: String,
    suffix: String,
    marker_case: Vec<bool>,
    file_name: String,
}

fuzz_target!(|input: FuzzInput| {
    let rules = DiscoveryRules::new();

    // Embed the marker with arbitrary letter case between arbitrary text
    let marker: String = rules
        .failure_marker
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if input.marker_case.get(i).copied().unwrap_or(false) {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    let content = format!("{}{}{}", input.prefix, marker, input.suffix);
    assert_eq!(rules.classify(&content), Expectation::Failure);

    // Candidate checks never panic and the sentinel is always a candidate
    let _ = rules.is_candidate(&input.file_name);
    assert!(rules.is_candidate(&rules.sentinel));
});

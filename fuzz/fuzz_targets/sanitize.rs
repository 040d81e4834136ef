#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let once = arcana_testenv::strip_ansi(&input);

    // Stripping only removes characters
    assert!(once.len() <= input.len());

    // A second pass has nothing left to remove
    assert_eq!(arcana_testenv::strip_ansi(&once), once);
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use payroll_model::{parse_currency, parse_percent, SalesRate};

const MAX_INPUT_BYTES: usize = 4 * 1024;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(MAX_INPUT_BYTES)];
    let input = String::from_utf8_lossy(data);

    assert!(parse_currency(&input).is_finite());
    assert!(parse_percent(&input).is_finite());
    if let SalesRate::Fraction(v) = SalesRate::parse(Some(input.as_ref())) {
        assert!(v.is_finite());
    }
});

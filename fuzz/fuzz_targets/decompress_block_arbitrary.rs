#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through the block decoder.  Errors are expected; a
    // panic or an out-of-range access is a bug.

    // Zero capacity: must succeed without reading anything.
    {
        let mut dst = vec![0u8; 0];
        assert_eq!(lzvn::decompress(data, &mut dst), Ok(0));
    }

    // One APFS chunk.
    {
        let mut dst = vec![0u8; 64 * 1024];
        if let Ok(n) = lzvn::decompress(data, &mut dst) {
            assert!(n <= dst.len());
        }
    }

    // Large output buffer to reach long match chains.
    {
        // Cap at 1 MiB so tiny inputs cannot claim huge outputs.
        let large = data.len().saturating_mul(271).min(1 << 20);
        let mut dst = vec![0u8; large];
        let _ = lzvn::decompress(data, &mut dst);
    }
});

#![no_main]
use libfuzzer_sys::fuzz_target;

// A smaller output capacity must never change the bytes that fit in it.
fuzz_target!(|input: (u16, &[u8])| {
    let (capacity, data) = input;
    let mut full = vec![0u8; 1 << 16];
    let Ok(full_len) = lzvn::decompress(data, &mut full) else {
        return;
    };

    let mut short = vec![0u8; capacity as usize];
    match lzvn::decompress(data, &mut short) {
        Ok(n) => {
            assert!(n <= full_len);
            assert_eq!(&short[..n], &full[..n]);
        }
        // The instruction that straddles the smaller capacity may not fit.
        Err(lzvn::DecompressError::OutOfBounds { .. }) => {
            assert!((capacity as usize) < full_len);
        }
        Err(e) => panic!("capacity {capacity}: {e}"),
    }
});

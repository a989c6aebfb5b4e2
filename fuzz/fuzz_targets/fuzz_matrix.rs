#![no_main]

use libfuzzer_sys::fuzz_target;

use strassen_core::{Matrix, MatrixError, MultiplyMode};

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    // Ragged rows from the input: constructors must reject, never panic
    let rows: Vec<Vec<i32>> = data[3..]
        .chunks(usize::from(data[0] % 8) + 1)
        .take(usize::from(data[1] % 8))
        .map(|chunk| chunk.iter().map(|&x| i32::from(x)).collect())
        .collect();

    let Ok(m) = Matrix::from_rows(rows.clone()) else {
        return;
    };
    assert_eq!(m.to_rows(), rows);

    // Mode parsing and direct runs either succeed or fail with a typed error
    let mode = format!("hybrid:{}", data[2]).parse::<MultiplyMode>();
    let Ok(mode) = mode else { return };
    let mut c = match Matrix::allocate(m.side()) {
        Ok(c) => c,
        Err(_) => return,
    };
    match mode.run(&m, &m, &mut c) {
        Ok(()) => {}
        Err(
            MatrixError::NotPowerOfTwo(_)
            | MatrixError::NotHalvable { .. }
            | MatrixError::InvalidCutoff(_),
        ) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});

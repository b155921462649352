//! Bitwise combinator regression test
//!
//! Checks the boolean algebra laws on random masks whose widths do and
//! do not fill whole machine words.
//!
//! Run with:
//! ```
//! cargo test -p binmask-core --test logic_reg
//! ```

use binmask_core::Mask;
use binmask_core::binary::{OFF, ON};
use binmask_test::{RegParams, random_mask};

fn and(a: &Mask, b: &Mask) -> Mask {
    let mut r = a.clone();
    r.and(b).unwrap();
    r
}

fn or(a: &Mask, b: &Mask) -> Mask {
    let mut r = a.clone();
    r.or(b).unwrap();
    r
}

fn not(a: &Mask) -> Mask {
    let mut r = a.clone();
    r.not();
    r
}

#[test]
fn logic_reg() {
    let mut rp = RegParams::new("logic");

    for (i, &(w, h)) in [(8, 8), (13, 7), (64, 3), (1, 19), (71, 5)].iter().enumerate() {
        let seed = 100 + i as u64 * 3;
        let a = random_mask(w, h, 0.5, seed).unwrap();
        let b = random_mask(w, h, 0.3, seed + 1).unwrap();
        let c = random_mask(w, h, 0.6, seed + 2).unwrap();

        // Double complement
        rp.compare_masks(&a, &not(&not(&a)));

        // De Morgan
        rp.compare_masks(&not(&and(&a, &b)), &or(&not(&a), &not(&b)));
        rp.compare_masks(&not(&or(&a, &b)), &and(&not(&a), &not(&b)));

        // Commutativity and associativity
        rp.compare_masks(&and(&a, &b), &and(&b, &a));
        rp.compare_masks(&or(&a, &b), &or(&b, &a));
        rp.compare_masks(&and(&and(&a, &b), &c), &and(&a, &and(&b, &c)));
        rp.compare_masks(&or(&or(&a, &b), &c), &or(&a, &or(&b, &c)));

        // Distributivity
        rp.compare_masks(&and(&a, &or(&b, &c)), &or(&and(&a, &b), &and(&a, &c)));

        // XOR is (a OR b) AND NOT (a AND b)
        let mut x = a.clone();
        x.xor(&b).unwrap();
        rp.compare_masks(&x, &and(&or(&a, &b), &not(&and(&a, &b))));

        // Counts: |a| + |b| = |a OR b| + |a AND b|
        rp.compare_values(
            (a.count() + b.count()) as f64,
            (or(&a, &b).count() + and(&a, &b).count()) as f64,
            0.0,
        );

        // Scalars against full masks
        let mut full = Mask::new(w, h).unwrap();
        full.fill(ON).unwrap();
        let mut s = a.clone();
        s.and_scalar(ON).unwrap();
        rp.compare_masks(&and(&a, &full), &s);
        let mut s = a.clone();
        s.xor_scalar(ON).unwrap();
        rp.compare_masks(&not(&a), &s);
        let mut s = a.clone();
        s.or_scalar(OFF).unwrap();
        rp.compare_masks(&a, &s);

        // Stored values stay 0/1 after every combinator
        let stored_ok = x.data().iter().all(|&v| v == OFF || v == ON);
        rp.compare_values(1.0, stored_ok as u8 as f64, 0.0);
    }

    assert!(rp.cleanup());
}

//! Component labelling regression test
//!
//! Checks the completeness of the flood-fill labelling on random masks:
//! every ON element gets a positive label, OFF elements stay 0, 4-neighbours
//! share labels, and labels follow row-major order of first encounter.
//!
//! Run with:
//! ```
//! cargo test -p binmask-region --test label_reg
//! ```

use binmask_core::Mask;
use binmask_core::binary::ON;
use binmask_region::{LabelGrid, labelize};
use binmask_test::{RegParams, random_mask};

/// Count the violations of the labelling contract.
fn violations(mask: &Mask, grid: &LabelGrid) -> usize {
    let (w, h) = mask.size();
    let mut bad = 0;
    let mut next_new = 1u32;
    for y in 1..=h {
        for x in 1..=w {
            let l = grid.get(x, y).unwrap();
            let on = mask.is_on(x, y);
            if on != (l > 0) {
                bad += 1;
            }
            if !on {
                continue;
            }
            // A label never seen before must be the next in sequence
            if l == next_new {
                next_new += 1;
            } else if l > next_new {
                bad += 1;
            }
            if x < w && mask.is_on(x + 1, y) && grid.get(x + 1, y).unwrap() != l {
                bad += 1;
            }
            if y < h && mask.is_on(x, y + 1) && grid.get(x, y + 1).unwrap() != l {
                bad += 1;
            }
        }
    }
    bad
}

#[test]
fn label_reg() {
    let mut rp = RegParams::new("label");

    // The two-blob scenario
    let mut mask = Mask::new(4, 4).unwrap();
    for (x, y) in [(1, 1), (1, 2), (2, 1), (4, 4)] {
        mask.set(x, y, ON).unwrap();
    }
    let (grid, count) = labelize(&mask).unwrap();
    rp.compare_values(2.0, count as f64, 0.0);
    rp.compare_values(1.0, grid.get(1, 2).unwrap() as f64, 0.0);
    rp.compare_values(1.0, grid.get(2, 1).unwrap() as f64, 0.0);
    rp.compare_values(2.0, grid.get(4, 4).unwrap() as f64, 0.0);
    rp.compare_values(0.0, grid.get(2, 2).unwrap() as f64, 0.0);

    // Random masks around the percolation threshold give large, twisted
    // components as well as many small ones
    for (i, &density) in [0.2, 0.45, 0.55, 0.6, 0.8].iter().enumerate() {
        let mask = random_mask(71, 43, density, 500 + i as u64).unwrap();
        let (grid, count) = labelize(&mask).unwrap();
        eprintln!("  density {}: {} components", density, count);

        rp.compare_values(0.0, violations(&mask, &grid) as f64, 0.0);
        rp.compare_values(count as f64, grid.count() as f64, 0.0);

        // Sizes add up to the ON count; each label's mask is one component
        let sizes = grid.component_sizes();
        rp.compare_values(mask.count() as f64, sizes.iter().sum::<usize>() as f64, 0.0);

        let bounds = grid.component_bounds();
        rp.compare_values(count as f64, bounds.len() as f64, 0.0);

        let mut union = Mask::new(71, 43).unwrap();
        for label in 1..=count as u32 {
            let part = grid.extract(label).unwrap();
            let win = bounds[label as usize - 1];
            let inside = part.count_window(win.llx, win.lly, win.urx, win.ury).unwrap();
            rp.compare_values(part.count() as f64, inside as f64, 0.0);
            rp.compare_values(sizes[label as usize - 1] as f64, part.count() as f64, 0.0);

            let (_, sub_count) = labelize(&part).unwrap();
            rp.compare_values(1.0, sub_count as f64, 0.0);
            union.or(&part).unwrap();
        }
        rp.compare_masks(&mask, &union);
    }

    // Fully ON: a single component covering everything
    let mut full = Mask::new(33, 9).unwrap();
    full.fill(ON).unwrap();
    let (grid, count) = labelize(&full).unwrap();
    rp.compare_values(1.0, count as f64, 0.0);
    rp.compare_values(1.0, grid.labels().iter().all(|&l| l == 1) as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

//! Morphological filter engine
//!
//! Erosion, dilation, opening and closing of a [`Mask`] by a structuring
//! kernel (see [`crate::kernel`]).
//!
//! # Semantics
//!
//! For an output element at `(x, y)` the footprint is the set of source
//! elements `(x + i - 1 - hx, y + j - 1 - hy)` for every ON kernel element
//! `(i, j)`:
//!
//! - Erosion: ON only if every footprint element is ON
//! - Dilation: ON if any footprint element is ON
//! - Opening: dilation of the erosion
//! - Closing: erosion of the dilation
//!
//! Only elements whose full `(2hx + 1) x (2hy + 1)` neighbourhood lies
//! inside the source are computed. The frame of width `hx`/`hy` around
//! them is governed by [`BorderMode`].
//!
//! # Word-parallel sweep
//!
//! Each output element is decided by comparing whole words of source
//! against the padded kernel rows. For erosion a kernel-ON position that
//! is OFF in the source shows up as a non-zero `(src ^ ONES) & kernel`;
//! for dilation a kernel-ON position that is ON shows up as a non-zero
//! `src & kernel`. Kernels up to [`WORD_BYTES`] wide with `hy <= 3` take
//! a path with the kernel rows held in a fixed-size array; everything else
//! goes through the general loop.

use crate::kernel::PaddedKernel;
use crate::{MorphError, MorphResult};
use binmask_core::Mask;
use binmask_core::word::{self, ONES, WORD_BYTES};
use std::ops::Range;

/// Morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Shrink ON regions
    Erosion,
    /// Grow ON regions
    Dilation,
    /// Erosion followed by dilation
    Opening,
    /// Dilation followed by erosion
    Closing,
}

impl FilterKind {
    /// The operation with the roles of ON and OFF exchanged.
    pub fn dual(self) -> Self {
        match self {
            FilterKind::Erosion => FilterKind::Dilation,
            FilterKind::Dilation => FilterKind::Erosion,
            FilterKind::Opening => FilterKind::Closing,
            FilterKind::Closing => FilterKind::Opening,
        }
    }

    /// Whether the operation runs two sweeps through a scratch mask.
    pub fn is_compound(self) -> bool {
        matches!(self, FilterKind::Opening | FilterKind::Closing)
    }
}

/// Treatment of the frame where the kernel footprint leaves the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// Leave the destination frame untouched
    Nop,
    /// Set the frame OFF
    Zero,
    /// Copy the frame from the source
    Copy,
    /// Drop the frame: the destination is `(w - 2hx) x (h - 2hy)`
    Crop,
}

/// How a destination buffer relates to the source buffer it is
/// filtered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// No shared element
    Disjoint,
    /// Shared, but the filter never reads an element it already wrote
    PermittedOverlap,
    /// Shared in a way that would corrupt the sweep
    ForbiddenOverlap,
}

impl Overlap {
    /// Classify two element ranges of the same address space.
    ///
    /// `width` is the row length and `hy` the kernel half-height. The
    /// sweep writes destination rows bottom to top and reads source rows
    /// up to `hy` above the one being written, so an overlapping source
    /// is safe only if it starts at least `hy + 1` rows after the
    /// destination. Opening and closing go through a scratch mask and
    /// accept any overlap.
    pub fn classify(
        kind: FilterKind,
        dst: Range<usize>,
        src: Range<usize>,
        width: usize,
        hy: usize,
    ) -> Self {
        if dst.end <= src.start || src.end <= dst.start {
            return Overlap::Disjoint;
        }
        if kind.is_compound() || src.start >= dst.start + (hy + 1) * width {
            Overlap::PermittedOverlap
        } else {
            Overlap::ForbiddenOverlap
        }
    }
}

/// Filter `src` into `dst`.
///
/// With [`BorderMode::Crop`] `dst` must be `(w - 2hx) x (h - 2hy)`;
/// otherwise it must match `src`. Opening and closing run their first
/// sweep with [`BorderMode::Copy`] into a scratch mask and apply `border`
/// to the second.
///
/// # Errors
///
/// Checked in this order, before `dst` is touched:
///
/// - [`MorphError::InvalidKernel`] if a kernel dimension is even
/// - [`MorphError::EmptyKernel`] if the kernel has no ON element
/// - [`MorphError::KernelTooLarge`] if a half-extent exceeds `src`
/// - [`MorphError::Core`] with a dimension mismatch for a wrongly sized
///   `dst`
pub fn filter(
    dst: &mut Mask,
    src: &Mask,
    kernel: &Mask,
    kind: FilterKind,
    border: BorderMode,
) -> MorphResult<()> {
    let padded = prepare(src, kernel)?;
    check_dst(dst, src, &padded, border)?;

    log::debug!(
        "filter {:?} {}x{} by {}x{} kernel, border {:?}",
        kind,
        src.width(),
        src.height(),
        kernel.width(),
        kernel.height(),
        border
    );

    match kind {
        FilterKind::Erosion | FilterKind::Dilation => {
            sweep(dst, src, &padded, kind == FilterKind::Erosion, border)?;
        }
        FilterKind::Opening | FilterKind::Closing => {
            let first_erodes = kind == FilterKind::Opening;
            let mut scratch = src.clone();
            sweep(&mut scratch, src, &padded, first_erodes, BorderMode::Copy)?;
            sweep(dst, &scratch, &padded, !first_erodes, border)?;
        }
    }
    Ok(())
}

/// Filter a mask onto itself.
///
/// Only opening and closing can run in place; they use one scratch mask.
///
/// # Errors
///
/// Same as [`filter`], plus [`MorphError::UnsupportedMode`] for erosion
/// or dilation, whose sweep would read rows it already overwrote, and for
/// [`BorderMode::Crop`], which cannot keep the mask size.
pub fn filter_in_place(
    mask: &mut Mask,
    kernel: &Mask,
    kind: FilterKind,
    border: BorderMode,
) -> MorphResult<()> {
    let padded = prepare(mask, kernel)?;
    let whole = 0..mask.len();
    let overlap = Overlap::classify(kind, whole.clone(), whole, mask.width(), padded.hy);
    if overlap == Overlap::ForbiddenOverlap {
        return Err(MorphError::UnsupportedMode(format!(
            "{:?} cannot run in place",
            kind
        )));
    }
    if border == BorderMode::Crop {
        return Err(MorphError::UnsupportedMode(
            "cropping border cannot run in place".into(),
        ));
    }

    log::debug!(
        "filter {:?} in place on {}x{}, border {:?}",
        kind,
        mask.width(),
        mask.height(),
        border
    );

    let first_erodes = kind == FilterKind::Opening;
    let mut scratch = mask.clone();
    sweep(&mut scratch, mask, &padded, first_erodes, BorderMode::Copy)?;
    sweep(mask, &scratch, &padded, !first_erodes, border)?;
    Ok(())
}

/// Erode `src` into a new mask.
///
/// The frame follows `border`; with [`BorderMode::Nop`] it stays OFF.
pub fn erode(src: &Mask, kernel: &Mask, border: BorderMode) -> MorphResult<Mask> {
    filter_new(src, kernel, FilterKind::Erosion, border)
}

/// Dilate `src` into a new mask.
pub fn dilate(src: &Mask, kernel: &Mask, border: BorderMode) -> MorphResult<Mask> {
    filter_new(src, kernel, FilterKind::Dilation, border)
}

/// Open `src` into a new mask.
pub fn open(src: &Mask, kernel: &Mask, border: BorderMode) -> MorphResult<Mask> {
    filter_new(src, kernel, FilterKind::Opening, border)
}

/// Close `src` into a new mask.
pub fn close(src: &Mask, kernel: &Mask, border: BorderMode) -> MorphResult<Mask> {
    filter_new(src, kernel, FilterKind::Closing, border)
}

fn filter_new(
    src: &Mask,
    kernel: &Mask,
    kind: FilterKind,
    border: BorderMode,
) -> MorphResult<Mask> {
    let padded = prepare(src, kernel)?;
    let (w, h) = output_size(src, &padded, border);
    if w == 0 || h == 0 {
        return Err(MorphError::UnsupportedMode(format!(
            "cropping a {}x{} mask by half-extents ({}, {}) leaves nothing",
            src.width(),
            src.height(),
            padded.hx,
            padded.hy
        )));
    }
    let mut dst = Mask::new(w, h)?;
    filter(&mut dst, src, kernel, kind, border)?;
    Ok(dst)
}

fn prepare(src: &Mask, kernel: &Mask) -> MorphResult<PaddedKernel> {
    let padded = PaddedKernel::new(kernel)?;
    padded.check_fits(src.width(), src.height())?;
    Ok(padded)
}

fn output_size(src: &Mask, padded: &PaddedKernel, border: BorderMode) -> (usize, usize) {
    if border == BorderMode::Crop {
        (
            src.width().saturating_sub(2 * padded.hx),
            src.height().saturating_sub(2 * padded.hy),
        )
    } else {
        src.size()
    }
}

fn check_dst(dst: &Mask, src: &Mask, padded: &PaddedKernel, border: BorderMode) -> MorphResult<()> {
    let expected = output_size(src, padded, border);
    if dst.size() != expected {
        return Err(binmask_core::Error::DimensionMismatch {
            expected,
            actual: dst.size(),
        }
        .into());
    }
    Ok(())
}

/// Half-open range of 0-based positions whose footprint fits inside a
/// dimension of length `len`.
#[inline]
fn interior(len: usize, half: usize) -> Range<usize> {
    half..len.saturating_sub(half).max(half)
}

/// One erosion or dilation sweep. Arguments are already validated.
fn sweep(
    dst: &mut Mask,
    src: &Mask,
    padded: &PaddedKernel,
    erode: bool,
    border: BorderMode,
) -> MorphResult<()> {
    let flip = if erode { ONES } else { 0 };
    let xs = interior(src.width(), padded.hx);
    let ys = interior(src.height(), padded.hy);

    let path = match (padded.words_per_row, padded.hy) {
        (1, 0) => sweep_narrow::<1>(dst, src, padded, flip, border, &xs, &ys),
        (1, 1) => sweep_narrow::<3>(dst, src, padded, flip, border, &xs, &ys),
        (1, 2) => sweep_narrow::<5>(dst, src, padded, flip, border, &xs, &ys),
        (1, 3) => sweep_narrow::<7>(dst, src, padded, flip, border, &xs, &ys),
        _ => sweep_general(dst, src, padded, flip, border, &xs, &ys),
    };
    log::trace!("sweep via {} path, interior {:?} x {:?}", path, xs, ys);

    fill_border(dst, src, border, &xs, &ys)
}

/// Destination offset of interior row `y0`, column `x0`.
#[inline]
fn dst_index(
    dst_width: usize,
    x0: usize,
    y0: usize,
    padded: &PaddedKernel,
    border: BorderMode,
) -> usize {
    if border == BorderMode::Crop {
        (y0 - padded.hy) * dst_width + (x0 - padded.hx)
    } else {
        y0 * dst_width + x0
    }
}

/// Whether the output is ON for a footprint where `found` tells whether a
/// mismatch (erosion) or a match (dilation) was seen.
#[inline]
fn decide(found: bool, flip: u64) -> bool {
    found != (flip != 0)
}

/// Sweep for kernels at most one word wide and `KH` rows high.
fn sweep_narrow<const KH: usize>(
    dst: &mut Mask,
    src: &Mask,
    padded: &PaddedKernel,
    flip: u64,
    border: BorderMode,
    xs: &Range<usize>,
    ys: &Range<usize>,
) -> &'static str {
    let mut rows = [0u64; KH];
    for (j, r) in rows.iter_mut().enumerate() {
        *r = padded.row(j)[0];
    }
    let w = src.width();
    let dw = dst.width();
    let data = src.data();

    for y0 in ys.clone() {
        let base = (y0 - padded.hy) * w;
        for x0 in xs.clone() {
            let start = base + x0 - padded.hx;
            let found = rows
                .iter()
                .enumerate()
                .any(|(j, &k)| (word::load(data, start + j * w) ^ flip) & k != 0);
            dst.put(dst_index(dw, x0, y0, padded, border), decide(found, flip));
        }
    }
    "narrow"
}

/// Sweep for any kernel size.
fn sweep_general(
    dst: &mut Mask,
    src: &Mask,
    padded: &PaddedKernel,
    flip: u64,
    border: BorderMode,
    xs: &Range<usize>,
    ys: &Range<usize>,
) -> &'static str {
    let w = src.width();
    let dw = dst.width();
    let data = src.data();

    for y0 in ys.clone() {
        let base = (y0 - padded.hy) * w;
        for x0 in xs.clone() {
            let start = base + x0 - padded.hx;
            let found = (0..padded.rows()).any(|j| {
                padded.row(j).iter().enumerate().any(|(k, &kw)| {
                    (word::load(data, start + j * w + k * WORD_BYTES) ^ flip) & kw != 0
                })
            });
            dst.put(dst_index(dw, x0, y0, padded, border), decide(found, flip));
        }
    }
    "general"
}

/// Apply the border policy to every element outside `xs x ys`.
fn fill_border(
    dst: &mut Mask,
    src: &Mask,
    border: BorderMode,
    xs: &Range<usize>,
    ys: &Range<usize>,
) -> MorphResult<()> {
    if matches!(border, BorderMode::Nop | BorderMode::Crop) {
        return Ok(());
    }
    let w = src.width();
    for y0 in 0..src.height() {
        let spans: [Range<usize>; 2] = if ys.contains(&y0) && !xs.is_empty() {
            [0..xs.start, xs.end..w]
        } else {
            [0..w, 0..0]
        };
        for span in spans {
            if span.is_empty() {
                continue;
            }
            let at = y0 * w;
            let range = at + span.start..at + span.end;
            match border {
                BorderMode::Zero => dst.fill_span(range, false),
                BorderMode::Copy => dst.copy_span(src, range)?,
                BorderMode::Nop | BorderMode::Crop => {}
            }
        }
    }
    Ok(())
}

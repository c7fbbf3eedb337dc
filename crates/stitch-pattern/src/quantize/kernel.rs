//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`: the neighbour at that offset receives
/// `error * weight / divisor`. Offsets only point at pixels the row-major
/// scan has not visited yet.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    pub entries: &'static [(i32, i32, u8)],
    pub divisor: u8,
}

/// Floyd-Steinberg: 100% of the error to four neighbours.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

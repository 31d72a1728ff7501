/// Per-program metadata, keyed by program id in `State::programas`.
#[derive(Clone, PartialEq, Debug)]
pub struct Program {
    /// First memory index of the code region (inclusive).
    pub inicio: usize,
    /// Program counter, an offset within the code region, starting at 0.
    pub contador: usize,
    /// First memory index of the data region.
    pub datos: usize,
    /// One past the last data cell (the accumulator's position + 1).
    pub fin: usize,
    /// Arrival time on the clock.
    pub tiempo_llegada: u64,
    /// Estimated burst (number of executable instructions), used by SJF.
    pub tiempo_rafaga: u32,
}

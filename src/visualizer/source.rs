/// Anything that can hand out a byte frequency snapshot.
pub trait FrequencySource {
    /// Number of bins a snapshot holds.
    fn frequency_bin_count(&self) -> usize;

    /// Fill `out` with the latest snapshot. Returns false when no snapshot
    /// could be produced this frame; `out` is then left untouched.
    fn byte_frequency_data(&self, out: &mut [u8]) -> bool;
}

/// Anything that can overwrite a buffer with its current byte-scaled
/// frequency magnitudes (one byte per bin, 0..=255).
pub trait SpectrumSource {
    fn fill_byte_frequency_data(&self, out: &mut [u8]);
}

/// Polled magnitude snapshot of one audio source.
///
/// The buffer is allocated once with `fft_size / 2` bins and reused on every
/// `update()`, so sampling every animation frame never allocates. When the
/// source produces no data the previous (or zeroed) values simply remain.
pub struct SignalSampler<S> {
    source: S,
    fft_size: u32,
    data: Box<[u8]>,
}

impl<S: SpectrumSource> SignalSampler<S> {
    pub fn new(source: S, fft_size: u32) -> Self {
        let bins = (fft_size / 2) as usize;
        Self {
            source,
            fft_size,
            data: vec![0u8; bins].into_boxed_slice(),
        }
    }

    /// Refresh the snapshot in place from the source.
    pub fn update(&mut self) {
        self.source.fill_byte_frequency_data(&mut self.data);
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn fft_size(&self) -> u32 {
        self.fft_size
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.data.len()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

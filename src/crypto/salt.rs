use getrandom::fill;

use crate::error::RandomUnavailable;

/// Source of salt bytes for new hashes.
///
/// `fill` must write random bytes into the whole buffer and return how many
/// were written, or fail. A hasher is safe to share between threads when its
/// generator is.
pub trait SaltGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fill(&self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<G: SaltGenerator + ?Sized> SaltGenerator for &G {
    type Error = G::Error;

    fn fill(&self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).fill(buf)
    }
}

/// Salt generator backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltGenerator;

impl SaltGenerator for OsSaltGenerator {
    type Error = RandomUnavailable;

    fn fill(&self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        fill(buf).map_err(RandomUnavailable)?;
        Ok(buf.len())
    }
}

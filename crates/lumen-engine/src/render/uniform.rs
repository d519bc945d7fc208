use bytemuck::{Pod, Zeroable};

/// Size of the signal uniform block in bytes.
///
/// Only 8 bytes carry data; the block is padded to the 16-byte uniform alignment.
pub const SIGNAL_UNIFORM_SIZE: u64 = 16;

/// CPU-side mirror of the shader's `Signal` uniform.
///
/// Layout: `[intensity: f32, time: f32, pad: [f32; 2]]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SignalUniform {
    pub intensity: f32,
    pub time: f32,
    pub _pad: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<SignalUniform>() as u64 == SIGNAL_UNIFORM_SIZE);

impl SignalUniform {
    #[inline]
    pub fn new(intensity: f32, time: f32) -> Self {
        Self {
            intensity,
            time,
            _pad: [0.0; 2],
        }
    }

    /// The exact bytes written to the uniform buffer: always the full block.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Minimum binding size for the bind group layout entry.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(SIGNAL_UNIFORM_SIZE)
            .expect("SignalUniform has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[offset..offset + 4]);
        f32::from_ne_bytes(raw)
    }

    #[test]
    fn block_is_always_sixteen_bytes() {
        assert_eq!(SignalUniform::new(0.0, 0.0).as_bytes().len(), 16);
        assert_eq!(SignalUniform::new(1.0, 1234.5).as_bytes().len(), 16);
        assert_eq!(std::mem::align_of::<SignalUniform>(), 4);
    }

    #[test]
    fn intensity_then_time_then_zero_padding() {
        let u = SignalUniform::new(0.42, 3.5);
        let bytes = u.as_bytes();
        assert_eq!(f32_at(bytes, 0), 0.42);
        assert_eq!(f32_at(bytes, 4), 3.5);
        assert!(bytes[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn min_binding_size_matches_block() {
        assert_eq!(SignalUniform::min_binding_size().get(), SIGNAL_UNIFORM_SIZE);
    }
}

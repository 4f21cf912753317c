use rand::RngCore;

/// A random source that replays a fixed sequence of bytes, looping once it runs out.
///
/// Useful wherever a run needs to be reproducible, e.g. in tests that exercise `RND`.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    bytes: Vec<u8>,
    next: usize,
}

impl SequenceRng {
    /// # Arguments
    /// * `bytes` the values to hand out in order; an empty sequence always yields 0
    pub fn new(bytes: &[u8]) -> Self {
        SequenceRng {
            bytes: bytes.to_vec(),
            next: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        let byte = self.bytes[self.next];
        self.next = (self.next + 1) % self.bytes.len();
        byte
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        u32::from(self.next_byte())
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_byte())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = self.next_byte();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loops_over_sequence() {
        let mut rng = SequenceRng::new(&[1, 2, 3]);
        let drawn: Vec<u32> = (0..5).map(|_| rng.next_u32()).collect();
        assert_eq!(drawn, vec![1, 2, 3, 1, 2]);
    }

    #[test]
    fn test_empty_sequence_yields_zero() {
        let mut rng = SequenceRng::new(&[]);
        let mut buf = [0xFF; 2];
        rng.fill_bytes(&mut buf);
        assert_eq!(buf, [0, 0]);
    }
}

//! Tests for the block compressor, backend selection and complexity estimates

#[cfg(test)]
mod tests {
    use kmarkov::compression::pipeline::HEADER_LEN;
    use kmarkov::compression::{Backend, BwtPipeline, Compressor, complexity};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.random()).collect()
    }

    // Tests that compression round-trips through every stage
    // Verified by dropping the primary index from the header
    #[test]
    fn test_decompress_inverts_compress() {
        let pipeline = BwtPipeline;
        let mut input = b"kolmogorov complexity ".repeat(40);
        input.extend(random_bytes(300, 3));

        let packed = pipeline.compress(&input).expect("compress");
        let restored = pipeline.decompress(&packed).expect("decompress");

        assert_eq!(restored, input);
    }

    // Tests that an empty block is just the header and terminator
    // Verified by omitting the end-of-block symbol
    #[test]
    fn test_empty_input() {
        let pipeline = BwtPipeline;
        let packed = pipeline.compress(&[]).expect("compress");

        assert!(packed.len() > HEADER_LEN);
        assert!(packed.len() <= HEADER_LEN + 2);
        assert_eq!(pipeline.decompress(&packed).expect("decompress"), Vec::<u8>::new());
    }

    // Tests that repeated calls report identical lengths
    // Verified by seeding the model from the clock
    #[test]
    fn test_complexity_is_deterministic() {
        let compressor = Backend::Bwt.compressor();
        let input = random_bytes(2048, 11);

        let first = complexity(compressor.as_ref(), &input).expect("complexity");
        let second = complexity(compressor.as_ref(), &input).expect("complexity");

        assert_eq!(first, second);
    }

    // Tests that constant data is far simpler than noise of the same length
    // Verified by skipping the move-to-front stage
    #[test]
    fn test_zeros_simpler_than_noise() {
        let compressor = Backend::Bwt.compressor();
        let len = 4096;

        let zeros = complexity(compressor.as_ref(), &vec![0u8; len]).expect("complexity");
        let noise = complexity(compressor.as_ref(), &random_bytes(len, 5)).expect("complexity");

        assert!(zeros < 64, "zeros compressed to {zeros} bytes");
        assert!(zeros < noise);
        assert!(noise > len * 9 / 10);
    }

    // Tests that concatenating a sequence with itself costs little extra
    // Verified by sorting rotations by their first byte only
    #[test]
    fn test_repetition_is_cheap() {
        let compressor = BwtPipeline;
        let block = random_bytes(1500, 9);
        let doubled = [block.clone(), block.clone()].concat();

        let single = compressor.compressed_len(&block).expect("length");
        let twice = compressor.compressed_len(&doubled).expect("length");

        assert!(twice < single * 3 / 2, "single {single}, doubled {twice}");
    }

    // Tests rejection of streams too short to hold a header
    // Verified by reading the header without a length check
    #[test]
    fn test_truncated_header() {
        assert!(BwtPipeline.decompress(&[1, 2, 3]).is_err());
    }

    // Tests backend names and selection
    // Verified by mapping both backends to the same compressor
    #[test]
    fn test_backend_selection() {
        assert_eq!(Backend::default(), Backend::Bwt);
        assert_eq!(Backend::Bwt.compressor().name(), "bwt");
        assert_eq!(Backend::Deflate.compressor().name(), "deflate");
    }
}

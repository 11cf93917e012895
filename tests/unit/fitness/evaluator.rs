//! Tests for the normalized compression distance and the fitness evaluator

#[cfg(test)]
mod tests {
    use bitvec::prelude::*;
    use kmarkov::compression::{Backend, complexity};
    use kmarkov::fitness::{FitnessEvaluator, normalized_compression_distance};
    use kmarkov::search::FitnessFunction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gradient_image(side: usize) -> Vec<u8> {
        (0..side * side)
            .map(|i| {
                let (row, col) = (i / side, i % side);
                ((row * 7 + col * 3) % 64) as u8 * 4
            })
            .collect()
    }

    // Tests the distance formula on hand-computed lengths
    // Verified by dividing by the smaller length
    #[test]
    fn test_ncd_formula() {
        let distance = normalized_compression_distance(100, 50, 120);
        assert!((distance - 0.7).abs() < 1e-12);

        let symmetric = normalized_compression_distance(50, 100, 120);
        assert!((symmetric - 0.7).abs() < 1e-12);

        assert!(normalized_compression_distance(0, 0, 0).abs() < f64::EPSILON);
    }

    // Tests that the original complexity is computed once with the chosen compressor
    // Verified by measuring the complexity of an empty slice
    #[test]
    fn test_original_complexity_precomputed() {
        let pixels = gradient_image(16);
        let expected =
            complexity(Backend::Bwt.compressor().as_ref(), &pixels).expect("complexity");

        let evaluator =
            FitnessEvaluator::new(pixels.clone(), Backend::Bwt.compressor()).expect("evaluator");

        assert_eq!(evaluator.original_complexity(), expected);
        assert_eq!(evaluator.pixels(), pixels.as_slice());
    }

    // Tests rejection of empty images and mismatched assignments
    // Verified by removing the length comparison
    #[test]
    fn test_invalid_inputs() {
        assert!(FitnessEvaluator::new(Vec::new(), Backend::Bwt.compressor()).is_err());

        let evaluator =
            FitnessEvaluator::new(vec![1u8; 10], Backend::Bwt.compressor()).expect("evaluator");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(evaluator.evaluate(bits![1; 9], &mut rng).is_err());
    }

    // Tests that a model identical to the image scores close to zero
    // Verified by concatenating the original with itself
    #[test]
    fn test_constant_image_scores_near_zero() {
        let pixels = vec![128u8; 64 * 64];
        let evaluator =
            FitnessEvaluator::new(pixels.clone(), Backend::Bwt.compressor()).expect("evaluator");
        let mut rng = StdRng::seed_from_u64(9);
        let assignment = bitvec![1; pixels.len()];

        let evaluation = evaluator
            .evaluate_detailed(&assignment, &mut rng)
            .expect("evaluate");

        assert_eq!(evaluation.model, pixels);
        assert_eq!(evaluation.model_complexity, evaluator.original_complexity());
        assert!(evaluation.distance < 0.5, "distance {}", evaluation.distance);
    }

    // Tests that the same generator seed gives the same score
    // Verified by drawing from a thread-local generator
    #[test]
    fn test_seeded_evaluation_is_reproducible() {
        let pixels = gradient_image(24);
        let evaluator = FitnessEvaluator::new(pixels, Backend::Bwt.compressor()).expect("evaluator");
        let assignment: BitVec = (0..24 * 24).map(|i| i % 5 < 2).collect();

        let first = evaluator
            .score(&assignment, &mut StdRng::seed_from_u64(44))
            .expect("score");
        let second = evaluator
            .score(&assignment, &mut StdRng::seed_from_u64(44))
            .expect("score");

        assert!(first.is_finite());
        assert!((first - second).abs() < f64::EPSILON);
    }

    // Tests that repeated scoring of one assignment is statistically stable
    // Verified by resampling the assignment between evaluations
    #[test]
    fn test_repeated_scores_have_bounded_spread() {
        let pixels = gradient_image(16);
        let evaluator = FitnessEvaluator::new(pixels, Backend::Bwt.compressor()).expect("evaluator");
        let assignment: BitVec = (0..256).map(|i| (i / 16) < 8).collect();

        let scores: Vec<f64> = (0..40)
            .map(|seed| {
                evaluator
                    .evaluate(&assignment, &mut StdRng::seed_from_u64(seed))
                    .expect("evaluate")
            })
            .collect();

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let variance =
            scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;

        assert!(scores.iter().all(|s| s.is_finite()));
        assert!(variance.sqrt() < 0.1, "standard deviation {}", variance.sqrt());
    }

    // Tests that the zlib backend plugs into the same evaluator
    // Verified by hard-wiring the default backend
    #[test]
    fn test_deflate_backend() {
        let pixels = gradient_image(16);
        let evaluator =
            FitnessEvaluator::new(pixels, Backend::Deflate.compressor()).expect("evaluator");
        let mut rng = StdRng::seed_from_u64(5);

        let distance = evaluator.evaluate(bits![1; 256], &mut rng).expect("evaluate");

        assert!(distance.is_finite());
        assert!(distance >= 0.0);
    }
}

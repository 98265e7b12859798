//! SciPy parity for multivariate log-densities, run through `verify::test_probability`.
//! Reference values from `scipy.stats.multivariate_normal.logpdf`.

#![allow(clippy::excessive_precision)]

mod util;

mod scipy_probability_tests {
    use super::util::{identity, init_tracing, sym};
    use distmv::kernels::scientific::distributions::multivariate::{Normal, Uniform};
    use distmv::kernels::scientific::distributions::shared::sampler::Sampler;
    use distmv::verify::{ProbCase, Report, test_probability};

    fn normal(mu: &[f64], sigma: &[f64]) -> Normal {
        let d = mu.len();
        Normal::new(mu, &sym(d, sigma), Sampler::with_seed(1)).unwrap()
    }

    fn cases<'a>(dist: &'a Normal, points: &[&[f64]], expect: &[f64]) -> Vec<ProbCase<'a>> {
        assert_eq!(points.len(), expect.len());
        points
            .iter()
            .zip(expect)
            .map(|(&loc, &log_prob)| ProbCase {
                dist,
                loc: loc.to_vec(),
                log_prob,
            })
            .collect()
    }

    const POINTS_2D: [&[f64]; 5] = [&[0.0, 0.0], &[1.0, 1.0], &[-1.0, -1.0], &[0.5, -0.5], &[2.0, 0.0]];

    #[test]
    fn mvn_standard_2d() {
        init_tracing();
        let n = Normal::new(&[0.0, 0.0], &identity(2), Sampler::with_seed(1)).unwrap();
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &POINTS_2D,
                &[
                    -1.8378770664093453,
                    -2.8378770664093453,
                    -2.8378770664093453,
                    -2.0878770664093453,
                    -3.8378770664093453,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_shifted_mean() {
        let n = normal(&[2.0, -1.0], &[1.0, 0.0, 0.0, 1.0]);
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &POINTS_2D,
                &[
                    -4.3378770664093453,
                    -4.3378770664093453,
                    -6.3378770664093453,
                    -3.0878770664093453,
                    -2.3378770664093453,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_correlated_2d() {
        let n = normal(&[0.0, 0.0], &[1.0, 0.5, 0.5, 1.0]);
        let points: [&[f64]; 5] = [&[0.0, 0.0], &[1.0, 1.0], &[-1.0, 1.0], &[2.0, -1.0], &[0.5, 0.5]];
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &points,
                &[
                    -1.6940360301834549,
                    -2.3607026968501215,
                    -3.6940360301834549,
                    -6.3607026968501224,
                    -1.8607026968501217,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_different_vars() {
        let n = normal(&[0.0, 0.0], &[4.0, 0.0, 0.0, 0.25]);
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &POINTS_2D,
                &[
                    -1.8378770664093453,
                    -3.9628770664093453,
                    -3.9628770664093453,
                    -2.3691270664093453,
                    -2.3378770664093453,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_elliptical() {
        let n = normal(&[1.0, 2.0], &[2.0, 1.0, 1.0, 3.0]);
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &POINTS_2D,
                &[
                    -3.3425960226263953,
                    -2.8425960226263953,
                    -4.442596022626395,
                    -3.7175960226263953,
                    -4.1425960226263951,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_3d() {
        let n = normal(
            &[1.0, -1.0, 0.0],
            &[2.0, 0.5, 0.0, 0.5, 1.0, -0.3, 0.0, -0.3, 1.5],
        );
        let points: [&[f64]; 4] = [
            &[0.0, 0.0, 0.0],
            &[1.0, -1.0, 0.0],
            &[2.0, -2.0, 1.0],
            &[-1.0, 0.0, -1.0],
        ];
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &points,
                &[
                    -4.4124271181326504,
                    -3.203838161077436,
                    -4.463551862508929,
                    -5.57398131036169,
                ],
            ),
        );
        report.finish();
    }

    #[test]
    fn mvn_standard_4d() {
        let n = Normal::new(&[0.0; 4], &identity(4), Sampler::with_seed(1)).unwrap();
        let points: [&[f64]; 3] = [&[0.0; 4], &[1.0; 4], &[-0.5; 4]];
        let mut report = Report::new();
        test_probability(
            &mut report,
            &cases(
                &n,
                &points,
                &[-3.6757541328186907, -5.6757541328186907, -4.1757541328186907],
            ),
        );
        report.finish();
    }

    #[test]
    fn uniform_box() {
        let unit = Uniform::new(&[(0.0, 1.0), (0.0, 1.0)], Sampler::with_seed(1)).unwrap();
        let wide = Uniform::new(&[(-1.0, 1.0), (-2.0, 2.0)], Sampler::with_seed(1)).unwrap();
        let thin =
            Uniform::new(&[(0.0, 0.5), (0.0, 0.25), (0.0, 2.0)], Sampler::with_seed(1)).unwrap();
        let mut report = Report::new();
        test_probability(
            &mut report,
            &[
                ProbCase {
                    dist: &unit,
                    loc: vec![0.5, 0.5],
                    log_prob: 0.0,
                },
                ProbCase {
                    dist: &wide,
                    loc: vec![0.0, 1.0],
                    log_prob: -2.0794415416798357,
                },
                ProbCase {
                    dist: &wide,
                    loc: vec![0.0, 2.5],
                    log_prob: f64::NEG_INFINITY,
                },
                ProbCase {
                    dist: &thin,
                    loc: vec![0.1, 0.1, 1.0],
                    log_prob: 1.3862943611198906,
                },
            ],
        );
        report.finish();
    }

    #[test]
    fn mismatches_are_all_reported() {
        let n = normal(&[0.0, 0.0], &[1.0, 0.0, 0.0, 1.0]);
        let mut report = Report::new();
        // two points off by 1e-10: each fails both the log and linear checks
        test_probability(
            &mut report,
            &cases(
                &n,
                &[&[0.0, 0.0], &[1.0, 1.0], &[2.0, 0.0]],
                &[-1.8378770664093453 + 1e-10, -2.8378770664093453, -3.8378770664093453 - 1e-10],
            ),
        );
        let failures = report.take_failures();
        assert_eq!(failures.len(), 4);
        assert!(failures[0].starts_with("LogProb mismatch: want: "));
        assert!(failures[1].starts_with("Prob mismatch: want: "));
    }
}

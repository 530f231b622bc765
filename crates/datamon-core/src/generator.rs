//! Random arithmetic problem generation.

use rand::Rng;

use crate::model::{Answer, MathProblem, Operator};

/// Smallest operand drawn for any problem.
pub const OPERAND_MIN: i64 = 0;
/// Largest operand drawn for any problem.
pub const OPERAND_MAX: i64 = 100;

/// Generate a problem for `operator`, drawing operands from `rng`.
///
/// Operands are uniform in `0..=100`. For [`Operator::DivRem`] the divisor is
/// uniform in `1..=100` and the expected answer satisfies
/// `dividend == divisor * quotient + remainder` with `0 <= remainder < divisor`.
pub fn generate<R: Rng + ?Sized>(operator: Operator, rng: &mut R) -> MathProblem {
    match operator {
        Operator::DivRem => {
            let divisor = rng.gen_range(1..=OPERAND_MAX);
            let dividend = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
            MathProblem {
                operator,
                operand_a: dividend,
                operand_b: divisor,
                expected: Answer::Division {
                    quotient: dividend.div_euclid(divisor),
                    remainder: dividend.rem_euclid(divisor),
                },
            }
        }
        _ => {
            let a = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
            let b = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
            let result = match operator {
                Operator::Add => a + b,
                Operator::Sub => a - b,
                _ => a * b,
            };
            MathProblem {
                operator,
                operand_a: a,
                operand_b: b,
                expected: Answer::Value(result),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scalar_problems_are_exact() {
        let mut rng = StdRng::seed_from_u64(42);
        for op in [Operator::Add, Operator::Sub, Operator::Mul] {
            for _ in 0..500 {
                let p = generate(op, &mut rng);
                assert_eq!(p.operator, op);
                assert!((OPERAND_MIN..=OPERAND_MAX).contains(&p.operand_a));
                assert!((OPERAND_MIN..=OPERAND_MAX).contains(&p.operand_b));
                let expected = match op {
                    Operator::Add => p.operand_a + p.operand_b,
                    Operator::Sub => p.operand_a - p.operand_b,
                    _ => p.operand_a * p.operand_b,
                };
                assert_eq!(p.expected, Answer::Value(expected));
            }
        }
    }

    #[test]
    fn division_satisfies_remainder_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = generate(Operator::DivRem, &mut rng);
            let (dividend, divisor) = (p.operand_a, p.operand_b);
            assert!(divisor >= 1, "divisor {divisor} must be positive");
            assert!((OPERAND_MIN..=OPERAND_MAX).contains(&dividend));
            let Answer::Division {
                quotient,
                remainder,
            } = p.expected
            else {
                panic!("division problem must expect quotient and remainder");
            };
            assert_eq!(dividend, divisor * quotient + remainder);
            assert!((0..divisor).contains(&remainder));
        }
    }

    #[test]
    fn same_seed_same_problems() {
        let mut rng1 = StdRng::seed_from_u64(123);
        let mut rng2 = StdRng::seed_from_u64(123);
        for _ in 0..20 {
            assert_eq!(
                generate(Operator::Mul, &mut rng1),
                generate(Operator::Mul, &mut rng2)
            );
        }
    }
}

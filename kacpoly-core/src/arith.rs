//! Integer helpers: gcd over vectors, divisors and the Möbius function.

use num_integer::Integer;

/// gcd of all entries; 0 for an empty or all-zero slice.
pub fn gcd_all(values: &[u32]) -> u32 {
    values.iter().fold(0u32, |acc, v| acc.gcd(v))
}

/// Positive divisors of `n` in increasing order. Empty for `n == 0`.
pub fn divisors(n: u32) -> Vec<u32> {
    if n == 0 {
        return vec![];
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u32;
    while (d as u64) * (d as u64) <= n as u64 {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Möbius function μ(n) for n ≥ 1.
pub fn mobius(n: u32) -> i32 {
    if n == 0 {
        return 0;
    }
    let mut n = n;
    let mut sign = 1;
    let mut p = 2u32;
    while (p as u64) * (p as u64) <= n as u64 {
        if n % p == 0 {
            n /= p;
            if n % p == 0 {
                return 0;
            }
            sign = -sign;
        }
        p += 1;
    }
    if n > 1 {
        sign = -sign;
    }
    sign
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd_all() {
        assert_eq!(gcd_all(&[4, 6, 8]), 2);
        assert_eq!(gcd_all(&[0, 0]), 0);
        assert_eq!(gcd_all(&[]), 0);
        assert_eq!(gcd_all(&[0, 9]), 9);
    }

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(9), vec![1, 3, 9]);
        assert!(divisors(0).is_empty());
    }

    #[test]
    fn test_mobius() {
        let expected = [1, -1, -1, 0, -1, 1, -1, 0, 0, 1, -1, 0];
        for (i, &mu) in expected.iter().enumerate() {
            assert_eq!(mobius(i as u32 + 1), mu, "mu({})", i + 1);
        }
    }
}

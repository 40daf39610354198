//! Table sizing. Double hashing only visits every slot when the probe step and
//! the capacity are coprime, which any step below a prime capacity is.

pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime that is at least `n`, never below 2. `None` when no such prime fits in a `usize`
pub fn next_prime(n: usize) -> Option<usize> {
    (n.max(2)..=usize::MAX).find(|candidate| is_prime(*candidate))
}

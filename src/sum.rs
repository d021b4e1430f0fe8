//! Three ways to compute `1 + 2 + ... + n`. Non-positive `n` sums to 0.
//!
//! Each variant returns `None` when the sum does not fit in an `i64`.

/// Largest `n` whose sum still fits in an `i64`.
pub const MAX_N: i64 = 4_294_967_295;

/// Closed form `n(n+1)/2`, halving the even factor before multiplying.
pub fn sum_to_n_a(n: i64) -> Option<i64> {
    if n <= 0 {
        return Some(0);
    }
    if n % 2 == 0 {
        (n / 2).checked_mul(n + 1)
    } else {
        n.checked_mul((n + 1) / 2)
    }
}

pub fn sum_to_n_b(n: i64) -> Option<i64> {
    if n <= 0 {
        return Some(0);
    }
    if n > MAX_N {
        return None;
    }
    let mut sum: i64 = 0;
    for i in 1..=n {
        sum = sum.checked_add(i)?;
    }
    Some(sum)
}

pub fn sum_to_n_c(n: i64) -> Option<i64> {
    if n <= 0 {
        return Some(0);
    }
    if n > MAX_N {
        return None;
    }
    (1..=n).try_fold(0i64, |acc, i| acc.checked_add(i))
}

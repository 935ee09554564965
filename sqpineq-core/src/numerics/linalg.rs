// ----------------- helpers (dependency-free) -----------------

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// x^T A x, A: (n x n) row-major
pub(crate) fn quadratic_form(a: &[f64], x: &[f64], n: usize) -> f64 {
    let mut s = 0.0;
    for i in 0..n {
        let xi = x[i];
        if xi == 0.0 {
            continue;
        }
        s += xi * dot(&a[i * n..(i + 1) * n], x);
    }
    s
}

/// out = alpha * v, in place
pub(crate) fn scale_inplace(v: &mut [f64], alpha: f64) {
    for vi in v.iter_mut() {
        *vi *= alpha;
    }
}

/// A <- 0.5 (A + A^T), A: (n x n) row-major
pub(crate) fn symmetrize_inplace(a: &mut [f64], n: usize) {
    for i in 0..n {
        for k in (i + 1)..n {
            let avg = 0.5 * (a[i * n + k] + a[k * n + i]);
            a[i * n + k] = avg;
            a[k * n + i] = avg;
        }
    }
}

/// Saturating Hill response `x^a / (k^b + x^b)`.
///
/// With `a == b` this is the classic cooperative term with half-saturation
/// constant `k`. Separate exponents let the numerator (production) and the
/// denominator (sensitivity) differ.
pub(crate) fn hill(x: f64, half_saturation: f64, numerator: f64, denominator: f64) -> f64 {
    x.powf(numerator) / (half_saturation.powf(denominator) + x.powf(denominator))
}

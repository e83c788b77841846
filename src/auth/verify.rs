//! Challenge answer verification.

/// Compare the submitted answer against the code bound to the open round.
///
/// Exact string equality: no trimming, no partial-match leniency. The
/// transport layer owns whatever normalization it guarantees; anything it
/// lets through is compared byte for byte.
#[must_use]
pub fn verify_answer(expected_code: &str, answer: &str) -> bool {
    expected_code == answer
}

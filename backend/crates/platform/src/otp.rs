//! OTP Code Generation
//!
//! Produces fixed-length numeric verification codes. These codes back
//! UX-level phone/email verification, not high-security secrecy; each
//! digit is drawn independently from a uniform distribution.

use rand::Rng;

/// Default code length when none is configured
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Generate a numeric OTP code of the given length.
///
/// ## Examples
/// ```rust
/// use platform::otp::generate_otp;
///
/// let code = generate_otp(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn generate_otp(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

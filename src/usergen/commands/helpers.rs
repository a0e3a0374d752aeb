const PASSWORD_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random password of `length` letters and digits, no special characters.
pub fn generate_password(length: usize) -> String {
    (0..length)
        .map(|_| PASSWORD_CHARS[fastrand::usize(..PASSWORD_CHARS.len())] as char)
        .collect()
}

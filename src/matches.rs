macro_rules! byte_map {
    // ===== 256 lookup table =====
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            PAT[$byte as usize]
        }
    };
}

byte_map! {
    /// token   = 1*tchar
    /// tchar   = "!" / "#" / "$" / "%" / "&" / "'" / "*"
    ///         / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
    ///         / DIGIT / ALPHA
    #[inline(always)]
    pub const fn is_token(byte: u8) {
        matches!(
            byte,
            | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
            | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
            | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z'
        )
    }
}

/// Returns `true` for characters that may not appear in a status description or header value.
///
/// Covers the C0 controls except HTAB, and DEL. Bare CR and LF fall in this range.
#[inline]
pub const fn is_forbidden_char(ch: char) -> bool {
    matches!(ch, '\0'..='\x08' | '\x0A'..='\x1F' | '\x7F')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token() {
        assert!(is_token(b'a'));
        assert!(is_token(b'Z'));
        assert!(is_token(b'-'));
        assert!(!is_token(b' '));
        assert!(!is_token(b':'));
        assert!(!is_token(0x80));
    }

    #[test]
    fn forbidden_char() {
        assert!(is_forbidden_char('\0'));
        assert!(is_forbidden_char('\r'));
        assert!(is_forbidden_char('\n'));
        assert!(is_forbidden_char('\x7F'));
        assert!(!is_forbidden_char('\t'));
        assert!(!is_forbidden_char(' '));
        assert!(!is_forbidden_char('é'));
    }
}

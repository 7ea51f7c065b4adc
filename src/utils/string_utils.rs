/// Utilitários para manipulação segura de strings UTF-8

/// Trunca uma string sem cortar no meio de um caractere UTF-8.
///
/// Usado para logar prefixos de tokens e authorization codes sem expor
/// o valor completo.
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe_ascii() {
        let token = "eyJhbGciOiJIUzI1NiJ9";
        assert_eq!(truncate_safe(token, 5), "eyJhb");
        assert_eq!(truncate_safe(token, 100), token);
    }

    #[test]
    fn test_truncate_safe_utf8() {
        let text = "código";
        // "có" = 3 bytes (c=1, ó=2); truncar em 2 não pode cortar o "ó"
        assert_eq!(truncate_safe(text, 2), "c");
        assert_eq!(truncate_safe(text, 3), "có");
    }
}

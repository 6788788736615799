//! 头像地址推导

/// 有邮箱时使用 Gravatar，否则用用户名首字母生成占位头像
#[must_use]
pub fn avatar_url(email: &str, username: &str) -> String {
    let email = email.trim().to_lowercase();
    if !email.is_empty() {
        let digest = md5::compute(email.as_bytes());
        return format!("https://www.gravatar.com/avatar/{digest:x}?d=identicon&s=200");
    }

    let initial = username
        .trim()
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect());
    format!("https://ui-avatars.com/api/?name={initial}&size=200")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_normalizes_email() {
        let a = avatar_url("  Alice@Example.COM ", "alice");
        let b = avatar_url("alice@example.com", "someone");
        assert_eq!(a, b);
        assert_eq!(
            a,
            format!(
                "https://www.gravatar.com/avatar/{:x}?d=identicon&s=200",
                md5::compute(b"alice@example.com")
            )
        );
    }

    #[test]
    fn test_fallback_uses_upper_initial() {
        assert_eq!(
            avatar_url("", "bob"),
            "https://ui-avatars.com/api/?name=B&size=200"
        );
        assert_eq!(
            avatar_url("   ", ""),
            "https://ui-avatars.com/api/?name=U&size=200"
        );
    }
}

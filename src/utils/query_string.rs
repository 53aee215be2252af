use urlencoding::encode;

/// Build a query string from key-value pairs
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    let mut first = true;
    let mut out = String::new();
    for (k, v) in pairs {
        if !first {
            out.push('&');
        } else {
            first = false;
        }
        out.push_str(&encode(k));
        out.push('=');
        out.push_str(&encode(v));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_pair_order() {
        let pairs = vec![
            ("command".to_string(), "startSystemVm".to_string()),
            ("id".to_string(), "7".to_string()),
        ];
        assert_eq!(build_query_string(&pairs), "command=startSystemVm&id=7");
    }

    #[test]
    fn encodes_reserved_characters() {
        let pairs = vec![("sessionkey".to_string(), "a+b/c=".to_string())];
        assert_eq!(build_query_string(&pairs), "sessionkey=a%2Bb%2Fc%3D");
    }

    #[test]
    fn empty_pairs_give_empty_string() {
        assert_eq!(build_query_string(&[]), "");
    }
}

/// Extract the host (with port) from a URL string, for display in the page header
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    if s.is_empty() {
        return "".into();
    }
    let s = match s.find("://") {
        Some(idx) => &s[idx + 3..],
        None => s,
    };
    s.split(['/', '?']).next().unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(hostname_from_url("http://mgmt.example:8080/client/api"), "mgmt.example:8080");
    }

    #[test]
    fn stops_at_query() {
        assert_eq!(hostname_from_url("mgmt.example?command=listZones"), "mgmt.example");
    }

    #[test]
    fn empty_input() {
        assert_eq!(hostname_from_url("   "), "");
    }
}

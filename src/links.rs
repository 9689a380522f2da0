//! Shareable link parameters
//!
//! - `wished`: comma separated ids, adopts a shared wishlist
//! - `name`: label of the person whose list is shown (read-only view)
//! - `id`: record shown on the detail page

/// Parameters the pages care about, decoded from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkParams {
    pub wished: Option<Vec<String>>,
    pub name: Option<String>,
    pub id: Option<String>,
}

impl LinkParams {
    /// Parse `?a=b&c=d` (leading `?` optional). Unknown keys are ignored,
    /// later duplicates win.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(raw);
            match key {
                // Split before decoding so an encoded comma stays inside its id
                "wished" => {
                    let ids = raw
                        .split(',')
                        .map(|id| decode(id).trim().to_string())
                        .filter(|id| !id.is_empty())
                        .collect();
                    params.wished = Some(ids);
                }
                "name" => {
                    let name = value.trim();
                    params.name = (!name.is_empty()).then(|| name.to_string());
                }
                "id" => {
                    let id = value.trim();
                    params.id = (!id.is_empty()).then(|| id.to_string());
                }
                _ => {}
            }
        }
        params
    }

    /// Viewing somebody else's list rather than our own
    pub fn is_shared_view(&self) -> bool {
        self.name.is_some()
    }
}

fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Link that opens `page` showing the given wishlist under `name`
pub fn share_url<'a, I>(page: &str, ids: I, name: Option<&str>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let encoded: Vec<String> = ids
        .into_iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect();
    let mut url = format!("{page}?wished={}", encoded.join(","));
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        url.push_str("&name=");
        url.push_str(&urlencoding::encode(name));
    }
    url
}

/// Detail page link for a record
pub fn detail_url(id: &str) -> String {
    format!("detail.html?id={}", urlencoding::encode(id))
}

/// `query` minus every `key=...` pair, `?` included when anything is left
pub fn without_param(query: &str, key: &str) -> String {
    let kept: Vec<&str> = query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split_once('=').map_or(*pair, |(k, _)| k) != key)
        .collect();
    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = LinkParams::parse("?wished=a,%20b,,c&name=Min+Ji&other=1");
        assert_eq!(
            params.wished,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(params.name.as_deref(), Some("Min Ji"));
        assert_eq!(params.id, None);
        assert!(params.is_shared_view());
    }

    #[test]
    fn test_parse_detail_id() {
        let params = LinkParams::parse("id=catan");
        assert_eq!(params.id.as_deref(), Some("catan"));
        assert_eq!(params.wished, None);
        assert!(!params.is_shared_view());

        assert_eq!(LinkParams::parse("?id=").id, None);
        assert_eq!(LinkParams::parse(""), LinkParams::default());
    }

    #[test]
    fn test_share_url_round_trip() {
        let url = share_url("wishlist.html", ["a b", "c,d"], Some("Jae & Co"));
        assert_eq!(url, "wishlist.html?wished=a%20b,c%2Cd&name=Jae%20%26%20Co");

        let query = url.split_once('?').unwrap().1;
        let params = LinkParams::parse(query);
        assert_eq!(
            params.wished,
            Some(vec!["a b".to_string(), "c,d".to_string()])
        );
        assert_eq!(params.name.as_deref(), Some("Jae & Co"));
    }

    #[test]
    fn test_without_param() {
        assert_eq!(without_param("?wished=a,b&name=Jae", "wished"), "?name=Jae");
        assert_eq!(without_param("?wished=a,b", "wished"), "");
        assert_eq!(without_param("id=x&wished", "wished"), "?id=x");
        assert_eq!(without_param("", "wished"), "");
    }
}

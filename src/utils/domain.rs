use url::Url;

/// 常見的兩層公共後綴，遇到時保留三層網域
const TWO_LEVEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "co.in", "gov.in", "nic.in", "org.in", "ac.in",
    "com.au", "net.au", "org.au", "gov.au", "co.nz", "co.jp", "com.br", "co.za", "com.sg",
];

/// 從 URL 取得可註冊網域，例如 `https://www.bbc.co.uk/news` → `bbc.co.uk`。
/// 無法解析或沒有主機名稱時回傳空字串。
pub fn domain_from_url(raw: &str) -> String {
    let host = match Url::parse(raw.trim()) {
        Ok(url) => match url.host_str() {
            Some(host) => host.to_ascii_lowercase(),
            None => return String::new(),
        },
        Err(_) => return String::new(),
    };

    registrable_domain(&host)
}

pub fn registrable_domain(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    if host.parse::<std::net::IpAddr>().is_ok() {
        return host.to_string();
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels.len() <= 2 {
        return labels.join(".");
    }

    let last_two = labels[labels.len() - 2..].join(".");
    let keep = if TWO_LEVEL_SUFFIXES.contains(&last_two.as_str()) {
        3
    } else {
        2
    };
    labels[labels.len() - keep..].join(".")
}

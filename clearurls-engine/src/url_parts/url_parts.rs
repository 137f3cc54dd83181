use crate::error::UrlPartsError;

use super::ParamMap;

/// URL 片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// 含 `=` 的片段，按查询参数处理
    Params(ParamMap),
    /// 普通锚点，原样保留
    Opaque(String),
}

impl Fragment {
    fn parse(raw: &str) -> Self {
        if raw.contains('=') {
            Fragment::Params(ParamMap::parse(raw))
        } else {
            Fragment::Opaque(raw.to_string())
        }
    }
}

/// 拆解后的URL
/// scheme/userinfo/host/path 保持原文，不做大小写或编码规范化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<ParamMap>,
    pub fragment: Option<Fragment>,
}

impl UrlParts {
    /// 拆解URL：scheme://[user[:password]@]host[:port][path][?query][#fragment]
    /// 缺少 scheme 或 host 即失败
    pub fn parse(url: &str) -> Result<Self, UrlPartsError> {
        let (scheme, rest) = url.split_once(':').ok_or(UrlPartsError::MissingScheme)?;
        if !is_valid_scheme(scheme) {
            return Err(UrlPartsError::MissingScheme);
        }
        let rest = rest.strip_prefix("//").ok_or(UrlPartsError::MissingHost)?;

        // 片段与查询串按首个分隔符切分
        let (rest, fragment) = match rest.split_once('#') {
            Some((before, fragment)) => (before, Some(fragment)),
            None => (rest, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((before, query)) => (before, Some(query)),
            None => (rest, None),
        };
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };

        let (userinfo, host_port) = match authority.rfind('@') {
            Some(idx) => (Some(&authority[..idx]), &authority[idx + 1..]),
            None => (None, authority),
        };
        let (user, password) = match userinfo {
            Some(info) => match info.split_once(':') {
                Some((user, password)) => (Some(user.to_string()), Some(password.to_string())),
                None => (Some(info.to_string()), None),
            },
            None => (None, None),
        };

        let (host, port) = split_host_port(host_port)?;
        if host.is_empty() {
            return Err(UrlPartsError::MissingHost);
        }

        Ok(Self {
            scheme: scheme.to_string(),
            user,
            password,
            host: host.to_string(),
            port,
            path: path.to_string(),
            query: query.map(ParamMap::parse),
            fragment: fragment.map(Fragment::parse),
        })
    }

    /// 按固定顺序重建URL
    /// 1. 默认端口（https:443 / http:80）省略
    /// 2. 过滤后为空的查询串/类查询片段整体省略
    pub fn compose(&self) -> String {
        let mut out = String::with_capacity(self.host.len() + self.path.len() + 32);
        out.push_str(&self.scheme);
        out.push_str("://");

        if let Some(user) = &self.user {
            out.push_str(user);
            if let Some(password) = &self.password {
                out.push(':');
                out.push_str(password);
            }
            out.push('@');
        }

        out.push_str(&self.host);
        if let Some(port) = self.port.filter(|port| !is_default_port(&self.scheme, *port)) {
            out.push(':');
            out.push_str(&port.to_string());
        }

        out.push_str(&self.path);

        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            out.push('?');
            out.push_str(&query.to_query_string());
        }

        match &self.fragment {
            Some(Fragment::Params(params)) if !params.is_empty() => {
                out.push('#');
                out.push_str(&params.to_query_string());
            }
            Some(Fragment::Opaque(raw)) => {
                out.push('#');
                out.push_str(raw);
            }
            _ => {}
        }

        out
    }
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// IPv6 字面量 `[::1]:8080` 的端口在方括号之后
fn split_host_port(host_port: &str) -> Result<(&str, Option<u16>), UrlPartsError> {
    let port_sep = if host_port.starts_with('[') {
        host_port
            .find(']')
            .and_then(|end| host_port[end..].find(':').map(|idx| end + idx))
    } else {
        host_port.rfind(':')
    };

    let Some(idx) = port_sep else {
        return Ok((host_port, None));
    };

    let (host, port) = (&host_port[..idx], &host_port[idx + 1..]);
    if port.is_empty() {
        return Ok((host, None));
    }
    port.parse::<u16>()
        .map(|port| (host, Some(port)))
        .map_err(|_| UrlPartsError::InvalidPort(port.to_string()))
}

fn is_default_port(scheme: &str, port: u16) -> bool {
    (scheme.eq_ignore_ascii_case("https") && port == 443)
        || (scheme.eq_ignore_ascii_case("http") && port == 80)
}

use std::io::Write;
use tempfile::NamedTempFile;
use url::form_urlencoded::byte_serialize;

/// The pair a visitor id is derived from.
#[derive(Debug, Clone, Copy)]
pub struct Visitor {
    pub refer: &'static str,
    pub ua: &'static str,
}

pub const ALICE: Visitor = Visitor {
    refer: "http://localhost/",
    ua: "Mozilla/5.0 (X11; Linux x86_64)",
};

pub const BOB: Visitor = Visitor {
    refer: "http://localhost/list/3.html",
    ua: "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)",
};

pub const CAROL: Visitor = Visitor {
    refer: "",
    ua: "curl/8.4.0",
};

/// Builds an nginx-style access log with `/dig?` beacon requests mixed with other traffic.
#[derive(Debug, Default)]
pub struct AccessLog {
    lines: Vec<String>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(mut self, visitor: Visitor, url: &str) -> Self {
        self.lines.push(beacon_line(url, visitor.refer, visitor.ua));
        self
    }

    pub fn visits(mut self, visitor: Visitor, url: &str, times: usize) -> Self {
        for _ in 0..times {
            self = self.visit(visitor, url);
        }
        self
    }

    /// A line with no beacon in it.
    pub fn noise(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn write(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create access log");
        for line in &self.lines {
            writeln!(file, "{line}").expect("failed to write access log");
        }
        file.flush().expect("failed to flush access log");
        file
    }
}

fn beacon_line(url: &str, refer: &str, ua: &str) -> String {
    let encode = |s: &str| byte_serialize(s.as_bytes()).collect::<String>();
    format!(
        "10.0.0.7 - - [05/Mar/2024:13:47:21 +0800] \"GET /dig?time=1709617641&url={}&refer={}&ua={} HTTP/1.1\" 200 43 \"-\" \"{}\"",
        encode(url),
        encode(refer),
        encode(ua),
        ua
    )
}

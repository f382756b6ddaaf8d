//! Creation payloads for every check archetype.
//!
//! Each archetype is a variant of [`NewCheck`] carrying only the fields its
//! `checks/add-<type>/` endpoint accepts. Field names are mapped to the wire
//! `msp_*` names with serde renames, so serialization to the request body
//! happens once at the transport boundary.

use serde::Serialize;
use serde_json::json;

/// Fields shared by every check creation payload.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CheckCommon {
    pub name: String,
    pub contact_groups: Vec<String>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
}

impl CheckCommon {
    /// Common fields for a named check with the given assignments.
    pub fn new(
        name: impl Into<String>,
        contact_groups: Vec<String>,
        locations: Vec<String>,
        tags: Vec<String>,
    ) -> Self {
        Self { name: name.into(), contact_groups, locations, tags }
    }

    /// The same assignments without probe locations, for check types the
    /// service runs from its own infrastructure (blacklist, malware, SSL,
    /// whois).
    pub fn without_locations(mut self) -> Self {
        self.locations.clear();
        self
    }
}

/// API (scripted HTTP) check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    /// Script steps as an embedded JSON document.
    #[serde(rename = "msp_script")]
    pub script: String,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// Domain blacklist check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlacklistCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_notes")]
    pub notes: String,
}

/// DNS record check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DnsCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_dns_server")]
    pub dns_server: String,
    /// One of ANY, A, AAAA, CNAME, MX, NS, PTR, SOA or TXT.
    #[serde(rename = "msp_dns_record_type")]
    pub dns_record_type: String,
    #[serde(rename = "msp_expect_string")]
    pub expect_string: String,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// HTTP(S) check payload.
///
/// Only the target and interval are mandatory; every tuning field that is
/// left unset is omitted from the request body and falls back to the
/// service default.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HttpCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity", skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<u32>,
    #[serde(rename = "msp_num_retries", skip_serializing_if = "Option::is_none")]
    pub num_retries: Option<u32>,
    #[serde(rename = "msp_use_ip_version", skip_serializing_if = "Option::is_none")]
    pub use_ip_version: Option<String>,
    /// Full URL of the page to check.
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "msp_password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "msp_send_string", skip_serializing_if = "Option::is_none")]
    pub send_string: Option<String>,
    #[serde(rename = "msp_expect_string", skip_serializing_if = "Option::is_none")]
    pub expect_string: Option<String>,
    /// STRING, REGEX or INVERSE_REGEX.
    #[serde(rename = "msp_expect_string_type", skip_serializing_if = "Option::is_none")]
    pub expect_string_type: Option<String>,
    /// Threshold for the response time or page load time, in seconds.
    #[serde(rename = "msp_threshold", skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    #[serde(rename = "msp_headers", skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(rename = "msp_notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "msp_include_in_global_metrics", skip_serializing_if = "Option::is_none")]
    pub include_in_global_metrics: Option<bool>,
}

/// ICMP ping check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IcmpCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// Mailbox protocol check payload, shared by the IMAP, POP and SMTP
/// endpoints (their field sets are identical).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MailCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_port")]
    pub port: u16,
    #[serde(rename = "msp_expect_string")]
    pub expect_string: String,
    /// `SSL_TLS` or empty for plaintext.
    #[serde(rename = "msp_encryption")]
    pub encryption: String,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// Malware/safe-browsing check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MalwareCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_notes")]
    pub notes: String,
}

/// NTP server check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NtpCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_port")]
    pub port: u16,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// Real user monitoring check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RumCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// SSH availability check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SshCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_port")]
    pub port: u16,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// SSL certificate expiry/validity check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SslCertCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_port")]
    pub port: u16,
    /// "http", "smtp", "pop3", "imap", "ftp", "xmpp", "irc" or "ldap".
    #[serde(rename = "msp_protocol")]
    pub protocol: String,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
}

/// Raw TCP or UDP socket check payload (the two endpoints take the same
/// fields).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SocketCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_interval")]
    pub interval: u32,
    #[serde(rename = "msp_sensitivity")]
    pub sensitivity: u32,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_use_ip_version")]
    pub use_ip_version: String,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_port")]
    pub port: u16,
    #[serde(rename = "msp_send_string")]
    pub send_string: String,
    #[serde(rename = "msp_expect_string")]
    pub expect_string: String,
    #[serde(rename = "msp_expect_string_type")]
    pub expect_string_type: String,
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
    #[serde(rename = "msp_include_in_global_metrics")]
    pub include_in_global_metrics: bool,
}

/// Domain expiry (whois) check payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WhoisCheck {
    #[serde(flatten)]
    pub common: CheckCommon,
    #[serde(rename = "msp_num_retries")]
    pub num_retries: u32,
    #[serde(rename = "msp_address")]
    pub address: String,
    #[serde(rename = "msp_expect_string")]
    pub expect_string: String,
    /// Days before expiry at which the check goes down.
    #[serde(rename = "msp_threshold")]
    pub threshold: u32,
    #[serde(rename = "msp_notes")]
    pub notes: String,
}

/// Payload for creating a check tag via `check-tags/`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewTag {
    pub tag: String,
    pub color_hex: String,
}

/// A check creation payload, one variant per archetype.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum NewCheck {
    Api(ApiCheck),
    Blacklist(BlacklistCheck),
    Dns(DnsCheck),
    Http(HttpCheck),
    Icmp(IcmpCheck),
    Imap(MailCheck),
    Malware(MalwareCheck),
    Ntp(NtpCheck),
    Pop(MailCheck),
    Rum(RumCheck),
    Smtp(MailCheck),
    Ssh(SshCheck),
    SslCert(SslCertCheck),
    Tcp(SocketCheck),
    Transaction(ApiCheck),
    Udp(SocketCheck),
    Whois(WhoisCheck),
}

fn encryption_flag(use_tls: bool) -> String {
    if use_tls { "SSL_TLS".to_owned() } else { String::new() }
}

impl NewCheck {
    /// Scripted API check issuing a GET and asserting the response status.
    pub fn api(common: CheckCommon, url: &str, status_code: &str) -> Self {
        let script = json!([
            { "step_def": "C_GET", "values": { "url": url, "headers": {} } },
            { "step_def": "V_HTTP_STATUS_CODE_IS", "values": { "status_code": status_code } }
        ]);
        Self::Api(ApiCheck {
            common,
            interval: 5,
            sensitivity: 1,
            num_retries: 1,
            use_ip_version: "IPV4".to_owned(),
            address: "httpbin.org".to_owned(),
            threshold: 0,
            script: script.to_string(),
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// Blacklist check for a domain.
    pub fn blacklist(common: CheckCommon, domain: &str) -> Self {
        Self::Blacklist(BlacklistCheck {
            common: common.without_locations(),
            num_retries: 2,
            address: domain.to_owned(),
            notes: String::new(),
        })
    }

    /// DNS check asserting the domain's A record.
    pub fn dns(common: CheckCommon, domain: &str, a_record: &str) -> Self {
        Self::Dns(DnsCheck {
            common,
            address: domain.to_owned(),
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            dns_server: String::new(),
            dns_record_type: "A".to_owned(),
            expect_string: a_record.to_owned(),
            threshold: 20,
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// HTTP check for a full page URL.
    pub fn http(common: CheckCommon, url: &str) -> Self {
        Self::Http(HttpCheck {
            common,
            interval: 1,
            sensitivity: Some(2),
            num_retries: Some(2),
            use_ip_version: Some(String::new()),
            address: url.to_owned(),
            username: Some(String::new()),
            password: Some(String::new()),
            send_string: Some(String::new()),
            expect_string: Some(String::new()),
            expect_string_type: Some("STRING".to_owned()),
            threshold: Some(10),
            headers: Some(String::new()),
            notes: Some(String::new()),
            include_in_global_metrics: Some(true),
        })
    }

    /// HTTP check carrying only the target and interval; every tuning field
    /// is left to the service default.
    pub fn http_basic(common: CheckCommon, url: &str, interval: u32) -> Self {
        Self::Http(HttpCheck {
            common,
            interval,
            sensitivity: None,
            num_retries: None,
            use_ip_version: None,
            address: url.to_owned(),
            username: None,
            password: None,
            send_string: None,
            expect_string: None,
            expect_string_type: None,
            threshold: None,
            headers: None,
            notes: None,
            include_in_global_metrics: None,
        })
    }

    /// ICMP ping check for an address.
    pub fn icmp(common: CheckCommon, address: &str) -> Self {
        Self::Icmp(IcmpCheck {
            common,
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            use_ip_version: "IPV4".to_owned(),
            address: address.to_owned(),
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// IMAP server check.
    pub fn imap(common: CheckCommon, server: &str, port: u16, use_tls: bool) -> Self {
        Self::Imap(Self::mail(common, server, port, use_tls))
    }

    /// Malware/safe-browsing check for a domain.
    pub fn malware(common: CheckCommon, domain: &str) -> Self {
        Self::Malware(MalwareCheck {
            common: common.without_locations(),
            num_retries: 2,
            address: domain.to_owned(),
            notes: String::new(),
        })
    }

    /// NTP server check on the standard port.
    pub fn ntp(common: CheckCommon, address: &str) -> Self {
        Self::Ntp(NtpCheck {
            common,
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            use_ip_version: "IPV4".to_owned(),
            address: address.to_owned(),
            port: 123,
            threshold: 1,
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// POP server check.
    pub fn pop(common: CheckCommon, server: &str, port: u16, use_tls: bool) -> Self {
        Self::Pop(Self::mail(common, server, port, use_tls))
    }

    /// Real user monitoring check for a domain.
    pub fn rum(common: CheckCommon, domain: &str) -> Self {
        Self::Rum(RumCheck {
            common,
            address: domain.to_owned(),
            threshold: 30,
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// SMTP server check.
    pub fn smtp(common: CheckCommon, server: &str, port: u16, use_tls: bool) -> Self {
        Self::Smtp(Self::mail(common, server, port, use_tls))
    }

    /// SSH availability check.
    pub fn ssh(common: CheckCommon, server: &str, port: u16) -> Self {
        Self::Ssh(SshCheck {
            common,
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            use_ip_version: "IPV4".to_owned(),
            address: server.to_owned(),
            port,
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// SSL certificate check on the given port and protocol.
    pub fn ssl_cert(common: CheckCommon, domain: &str, port: u16, protocol: &str) -> Self {
        Self::SslCert(SslCertCheck {
            common: common.without_locations(),
            num_retries: 2,
            address: domain.to_owned(),
            port,
            protocol: protocol.to_owned(),
            threshold: 10,
            notes: String::new(),
        })
    }

    /// TCP socket check, optionally sending and expecting strings.
    pub fn tcp(common: CheckCommon, server: &str, port: u16, send: &str, expect: &str) -> Self {
        Self::Tcp(Self::socket(common, server, port, send, expect, String::new()))
    }

    /// Transaction check opening a URL and asserting the response status.
    pub fn transaction(common: CheckCommon, open_url: &str, expect_status: &str) -> Self {
        let script = json!([
            { "step_def": "C_OPEN_URL", "values": { "url": open_url, "headers": {} } },
            { "step_def": "V_HTTP_STATUS_CODE_IS", "values": { "http_status": expect_status } }
        ]);
        Self::Transaction(ApiCheck {
            common,
            interval: 5,
            sensitivity: 1,
            num_retries: 1,
            use_ip_version: "IPV4".to_owned(),
            address: "httpbin.org".to_owned(),
            threshold: 0,
            script: script.to_string(),
            notes: String::new(),
            include_in_global_metrics: true,
        })
    }

    /// UDP socket check, sending a string and expecting a reply.
    pub fn udp(common: CheckCommon, address: &str, port: u16, send: &str, expect: &str) -> Self {
        Self::Udp(Self::socket(common, address, port, send, expect, String::new()))
    }

    /// Whois/domain expiry check, optionally asserting the registrar and
    /// nameservers.
    pub fn whois(
        common: CheckCommon,
        domain: &str,
        days_to_expire: u32,
        registrar: Option<&str>,
        nameservers: Option<&[&str]>,
    ) -> Self {
        let mut expect_string = String::new();
        if let Some(registrar) = registrar {
            expect_string.push_str(&format!("registrar: {registrar}"));
        }
        if let Some(nameservers) = nameservers {
            expect_string.push_str(&format!("nameservers: {}", nameservers.join(",")));
        }
        Self::Whois(WhoisCheck {
            common: common.without_locations(),
            num_retries: 2,
            address: domain.to_owned(),
            expect_string,
            threshold: days_to_expire,
            notes: String::new(),
        })
    }

    fn mail(common: CheckCommon, server: &str, port: u16, use_tls: bool) -> MailCheck {
        MailCheck {
            common,
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            use_ip_version: "IPV4".to_owned(),
            address: server.to_owned(),
            port,
            expect_string: String::new(),
            encryption: encryption_flag(use_tls),
            notes: String::new(),
            include_in_global_metrics: true,
        }
    }

    fn socket(
        common: CheckCommon,
        address: &str,
        port: u16,
        send: &str,
        expect: &str,
        use_ip_version: String,
    ) -> SocketCheck {
        SocketCheck {
            common,
            interval: 1,
            sensitivity: 2,
            num_retries: 2,
            use_ip_version,
            address: address.to_owned(),
            port,
            send_string: send.to_owned(),
            expect_string: expect.to_owned(),
            expect_string_type: "STRING".to_owned(),
            threshold: 10,
            notes: String::new(),
            include_in_global_metrics: true,
        }
    }

    /// Path of the type-specific creation endpoint, relative to the API base.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Api(_) => "checks/add-api/",
            Self::Blacklist(_) => "checks/add-blacklist/",
            Self::Dns(_) => "checks/add-dns/",
            Self::Http(_) => "checks/add-http/",
            Self::Icmp(_) => "checks/add-icmp/",
            Self::Imap(_) => "checks/add-imap/",
            Self::Malware(_) => "checks/add-malware/",
            Self::Ntp(_) => "checks/add-ntp/",
            Self::Pop(_) => "checks/add-pop/",
            Self::Rum(_) => "checks/add-rum/",
            Self::Smtp(_) => "checks/add-smtp/",
            Self::Ssh(_) => "checks/add-ssh/",
            Self::SslCert(_) => "checks/add-ssl-cert/",
            Self::Tcp(_) => "checks/add-tcp/",
            Self::Transaction(_) => "checks/add-transaction/",
            Self::Udp(_) => "checks/add-udp/",
            Self::Whois(_) => "checks/add-whois/",
        }
    }

    /// Short archetype label, used when generating check names.
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Api(_) => "API",
            Self::Blacklist(_) => "BLACKLIST",
            Self::Dns(_) => "DNS",
            Self::Http(_) => "HTTP",
            Self::Icmp(_) => "ICMP",
            Self::Imap(_) => "IMAP",
            Self::Malware(_) => "MALWARE",
            Self::Ntp(_) => "NTP",
            Self::Pop(_) => "POP",
            Self::Rum(_) => "RUM",
            Self::Smtp(_) => "SMTP",
            Self::Ssh(_) => "SSH",
            Self::SslCert(_) => "SSL",
            Self::Tcp(_) => "TCP",
            Self::Transaction(_) => "TRANSACTION",
            Self::Udp(_) => "UDP",
            Self::Whois(_) => "WHOIS",
        }
    }
}

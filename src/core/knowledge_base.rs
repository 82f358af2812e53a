//! Static, read-only descriptions of every vulnerability class the scanner
//! reports, with human-readable explanations and remediation steps.

use crate::core::models::{Severity, VulnerabilityClass};
use std::fmt;

/// High-level grouping used to label findings in the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    /// Attacker-controlled input reaching an interpreter, file loader or fetcher.
    Injection,
    /// Requests the application should have refused or bound to a user.
    AccessControl,
    /// Server setup leaking information.
    Configuration,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Injection => write!(f, "Injection"),
            FindingCategory::AccessControl => write!(f, "Access Control"),
            FindingCategory::Configuration => write!(f, "Configuration"),
        }
    }
}

/// Everything needed to present one vulnerability class to an operator.
pub struct FindingDetail {
    pub class: VulnerabilityClass,
    pub title: &'static str,
    pub category: FindingCategory,
    pub severity: Severity,
    /// What the finding means and why it is a problem.
    pub description: &'static str,
    /// Actionable steps to fix it.
    pub remediation: &'static str,
}

static FINDINGS: &[FindingDetail] = &[
    // --- Injection ---
    FindingDetail {
        class: VulnerabilityClass::Xss,
        title: "Reflected Cross-Site Scripting",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "A script payload sent in the 'q' parameter was returned unescaped in the page. An attacker can craft a link that runs JavaScript in a victim's browser under this site's origin, stealing sessions or performing actions as the user.",
        remediation: "Encode all user input for the HTML context it is written into, prefer templating engines with auto-escaping, and add a Content-Security-Policy that forbids inline scripts.",
    },
    FindingDetail {
        class: VulnerabilityClass::Sqli,
        title: "SQL Injection",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "The external SQL injection scanner reported an injectable parameter. Attackers may read or modify database contents, bypass authentication or, in some setups, execute commands on the database host.",
        remediation: "Use parameterized queries or prepared statements everywhere, never build SQL by string concatenation, and run the application with a least-privilege database account.",
    },
    FindingDetail {
        class: VulnerabilityClass::Lfi,
        title: "Local File Inclusion",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "A path passed in the 'file' parameter caused the contents of a local system file (such as /etc/passwd or the process environment) to appear in the response. Attackers can read configuration, credentials and source code.",
        remediation: "Never pass user input to file APIs. Map allowed identifiers to fixed paths on the server and reject path separators and '..' sequences.",
    },
    FindingDetail {
        class: VulnerabilityClass::Rfi,
        title: "Remote File Inclusion",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "A remote URL passed in the 'include' parameter was reflected or fetched by the application. If the server includes remote content as code, an attacker can execute arbitrary code.",
        remediation: "Disable remote includes in the runtime (e.g. allow_url_include=Off in PHP) and only include files from a fixed allow-list.",
    },
    FindingDetail {
        class: VulnerabilityClass::Ssrf,
        title: "Server-Side Request Forgery",
        category: FindingCategory::Injection,
        severity: Severity::Critical,
        description: "A URL in the 'url' parameter made the server fetch the cloud instance metadata service. Attackers can reach internal services and steal cloud credentials.",
        remediation: "Validate outbound URLs against an allow-list, block link-local and private address ranges, and require IMDSv2 session tokens on cloud instances.",
    },
    FindingDetail {
        class: VulnerabilityClass::InsecureDeserialization,
        title: "Insecure Deserialization",
        category: FindingCategory::Injection,
        severity: Severity::Warning,
        description: "A serialized object sent in the 'data' parameter caused a server error or a pickle-related message. Deserializing untrusted data can lead to remote code execution.",
        remediation: "Do not deserialize untrusted input with native object formats such as pickle. Use a data-only format like JSON and sign any state that must round-trip through the client.",
    },
    // --- Access Control ---
    FindingDetail {
        class: VulnerabilityClass::Idor,
        title: "Insecure Direct Object Reference",
        category: FindingCategory::AccessControl,
        severity: Severity::Warning,
        description: "Changing the numeric 'id' parameter returned another object without an authorization error. Users may be able to access records that belong to others.",
        remediation: "Check on every request that the authenticated user owns or may access the requested object, and consider non-sequential identifiers.",
    },
    FindingDetail {
        class: VulnerabilityClass::Csrf,
        title: "Missing CSRF Token",
        category: FindingCategory::AccessControl,
        severity: Severity::Warning,
        description: "A form on this page has no anti-CSRF token field. Another site could submit the form on behalf of a logged-in user.",
        remediation: "Add a per-session or per-request CSRF token to every state-changing form and verify it server-side. Set session cookies with SameSite=Lax or Strict.",
    },
    FindingDetail {
        class: VulnerabilityClass::OpenRedirect,
        title: "Open Redirect",
        category: FindingCategory::AccessControl,
        severity: Severity::Warning,
        description: "The 'redirect' parameter sends visitors to an arbitrary external site. Attackers use trusted domains with open redirects to make phishing links look legitimate.",
        remediation: "Only redirect to relative paths or to destinations on an allow-list, and never take the full target URL from user input.",
    },
    // --- Configuration ---
    FindingDetail {
        class: VulnerabilityClass::Misconfig,
        title: "Server Version Disclosure",
        category: FindingCategory::Configuration,
        severity: Severity::Info,
        description: "Response headers such as Server, X-Powered-By or X-AspNet-Version reveal the software stack. This helps attackers pick exploits for known vulnerable versions.",
        remediation: "Remove or genericize these headers in the web server and framework configuration (e.g. server_tokens off in Nginx, expose_php=Off in PHP).",
    },
];

/// Retrieves the detail for a vulnerability class. Every class has one.
pub fn get_finding_detail(class: VulnerabilityClass) -> &'static FindingDetail {
    FINDINGS
        .iter()
        .find(|f| f.class == class)
        .unwrap_or(&FINDINGS[0])
}

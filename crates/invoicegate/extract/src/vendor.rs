//! Vendor-name extraction.
//!
//! The vendor line is almost always near the top of an invoice. Two
//! tiers, both restricted to the document head:
//!
//! 1. An organization scan over the first 15 lines: lines carrying a
//!    corporate suffix (Inc, Corp, Ltd, ...) qualify unless they contain
//!    invoice jargon. First qualifying line in document order wins.
//! 2. A heuristic over the first 5 lines: a line with 2-4 capitalized
//!    words and at most 5 words total that is not itself a jargon line
//!    is taken verbatim.

/// Invoice-jargon stopwords that disqualify an organization candidate.
const JARGON_STOPWORDS: &[&str] = &[
    "invoice",
    "bill",
    "statement",
    "receipt",
    "description",
    "qty",
    "price",
    "total",
    "customer",
    "client",
];

/// Labels that disqualify a heuristic candidate line.
const LABEL_WORDS: &[&str] = &["invoice", "bill", "statement", "receipt", "from", "to"];

/// Corporate suffixes marking an organization-like line.
const ORG_SUFFIXES: &[&str] = &[
    "inc",
    "corp",
    "corporation",
    "company",
    "co",
    "ltd",
    "llc",
    "plc",
    "gmbh",
    "solutions",
    "services",
    "systems",
];

/// Number of head lines searched for organization candidates.
const ORG_SCAN_LINES: usize = 15;

/// Number of head lines searched by the capitalized-words heuristic.
const HEURISTIC_SCAN_LINES: usize = 5;

/// Extract the vendor name from the document head, if any.
pub fn extract(text: &str) -> Option<String> {
    let head: Vec<&str> = text.lines().take(ORG_SCAN_LINES).collect();

    if let Some(org) = first_organization_line(&head) {
        return Some(org.to_string());
    }

    first_heuristic_line(&head).map(|line| line.to_string())
}

/// First organization-like line in the head that carries no jargon.
fn first_organization_line<'a>(head: &[&'a str]) -> Option<&'a str> {
    for line in head {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();
        if JARGON_STOPWORDS.iter().any(|w| lower.contains(w)) {
            continue;
        }
        let has_suffix = line.split_whitespace().any(|word| {
            let cleaned = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            ORG_SUFFIXES.contains(&cleaned.as_str())
        });
        if has_suffix {
            return Some(line);
        }
    }
    None
}

/// Fallback: first of the top 5 lines that looks like a company name:
/// starts uppercase, 2-4 capitalized words, at most 5 words total, and
/// not a common label line.
fn first_heuristic_line<'a>(head: &[&'a str]) -> Option<&'a str> {
    for line in head.iter().take(HEURISTIC_SCAN_LINES) {
        let line = line.trim();
        if line.len() <= 5 || !line.chars().next().is_some_and(|c| c.is_uppercase()) {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() > 5 {
            continue;
        }
        let cap_words = words
            .iter()
            .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
            .count();
        if !(2..=4).contains(&cap_words) {
            continue;
        }
        let is_label = words
            .iter()
            .any(|w| LABEL_WORDS.contains(&w.to_lowercase().as_str()));
        if !is_label {
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corporate_suffix_line_wins() {
        let text = "ACME Corporation\n123 Business Street\nInvoice # 100";
        assert_eq!(extract(text), Some("ACME Corporation".to_string()));
    }

    #[test]
    fn jargon_line_is_skipped_even_with_suffix() {
        let text = "Invoice from Acme Corp\nGlobex Ltd\nDate: 01/01/2026";
        assert_eq!(extract(text), Some("Globex Ltd".to_string()));
    }

    #[test]
    fn heuristic_fallback_when_no_suffix() {
        let text = "Blue River Partners\n42 Canal Road\nInvoice #: 7";
        assert_eq!(extract(text), Some("Blue River Partners".to_string()));
    }

    #[test]
    fn heuristic_rejects_label_lines() {
        let text = "Bill To John\nunstructured lowercase line\n";
        assert_eq!(extract(text), None);
    }

    #[test]
    fn org_scan_limited_to_first_15_lines() {
        let mut lines = vec!["x"; 15];
        lines.push("Late Vendor Inc");
        let text = lines.join("\n");
        assert_eq!(extract(&text), None);
    }

    #[test]
    fn heuristic_limited_to_first_5_lines() {
        let text = "a\nb\nc\nd\ne\nBlue River Partners\n";
        assert_eq!(extract(text), None);
    }

    #[test]
    fn empty_text_yields_none() {
        assert_eq!(extract(""), None);
    }
}

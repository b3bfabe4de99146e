//! Replies from the PSG API.
//!
//! A reply asking for several outputs is one text stream in which each
//! output follows a `results_<name>.txt` marker.

use crate::Config;
use log::debug;
use rpsg_core::RPSGResult;
use std::collections::BTreeMap;

const MARKER: &str = "results_";
const SUFFIX: &str = ".txt";

/// Splits a multi-part reply into `name -> block`, each block trimmed.
///
/// Text before the first marker is discarded. A later block of the same
/// name replaces an earlier one.
pub fn split_results(bytes: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(bytes);
    let mut markers = Vec::new();
    let mut from = 0;
    while let Some(pos) = text[from..].find(MARKER) {
        let start = from + pos;
        let name_start = start + MARKER.len();
        let name_len = text[name_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(text.len() - name_start);
        let name_end = name_start + name_len;
        if name_len > 0 && text[name_end..].starts_with(SUFFIX) {
            markers.push((start, name_end + SUFFIX.len(), &text[name_start..name_end]));
            from = name_end + SUFFIX.len();
        } else {
            from = name_start;
        }
    }

    let mut blocks = BTreeMap::new();
    for (i, &(_, body_start, name)) in markers.iter().enumerate() {
        let body_end = markers.get(i + 1).map_or(text.len(), |&(next, _, _)| next);
        blocks.insert(
            name.to_string(),
            text[body_start..body_end].trim().to_string(),
        );
    }
    debug!(
        "Split reply into {} blocks: {:?}",
        blocks.len(),
        blocks.keys().collect::<Vec<_>>()
    );
    blocks
}

/// A parsed reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// The configuration PSG ran, when it was returned.
    pub cfg: Option<Config>,
    /// Every other output, as raw text keyed by name.
    pub outputs: BTreeMap<String, String>,
}

impl Response {
    /// Reads a multi-part reply.
    pub fn from_bytes(bytes: &[u8]) -> RPSGResult<Self> {
        let mut outputs = split_results(bytes);
        let cfg = outputs
            .remove("cfg")
            .map(|text| Config::from_text(&text))
            .transpose()?;
        Ok(Self { cfg, outputs })
    }

    /// Reads a reply holding a single output named `name`.
    pub fn single(name: &str, bytes: &[u8]) -> RPSGResult<Self> {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        if name == "cfg" {
            return Ok(Self {
                cfg: Some(Config::from_text(&text)?),
                outputs: BTreeMap::new(),
            });
        }
        Ok(Self {
            cfg: None,
            outputs: BTreeMap::from([(name.to_string(), text)]),
        })
    }

    /// The raw text of output `name`.
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "results_cfg.txt\n\
                         <OBJECT>Planet\n\
                         <OBJECT-NAME>Earth\n\
                         results_rad.txt\n\
                         # Wave/freq Total\n\
                         1.0 2.0\n\
                         results_noi.txt\n\
                         # noise\n";

    #[test]
    fn test_split_results() {
        let blocks = split_results(REPLY.as_bytes());
        assert_eq!(
            blocks.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["cfg", "noi", "rad"]
        );
        assert_eq!(blocks["cfg"], "<OBJECT>Planet\n<OBJECT-NAME>Earth");
        assert_eq!(blocks["rad"], "# Wave/freq Total\n1.0 2.0");
        assert_eq!(blocks["noi"], "# noise");
    }

    #[test]
    fn test_marker_lookalikes_kept_in_body() {
        let blocks = split_results(b"results_rad.txt\nsee results_ for more\nresults_.txt");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks["rad"], "see results_ for more\nresults_.txt");
    }

    #[test]
    fn test_no_markers() {
        assert!(split_results(b"<OBJECT>Planet").is_empty());
    }

    #[test]
    fn test_response_parses_cfg() {
        let response = Response::from_bytes(REPLY.as_bytes()).unwrap();
        let target = response.cfg.as_ref().and_then(|c| c.target.as_ref()).unwrap();
        assert_eq!(
            target.get("name").and_then(|v| v.as_str()),
            Some("Earth")
        );
        assert!(response.output("cfg").is_none());
        assert_eq!(response.output("noi"), Some("# noise"));
    }

    #[test]
    fn test_single_output() {
        let response = Response::single("rad", b"  1.0 2.0\n").unwrap();
        assert!(response.cfg.is_none());
        assert_eq!(response.output("rad"), Some("1.0 2.0"));

        let response = Response::single("cfg", b"<GENERATOR-NOISE>NO").unwrap();
        assert!(response.cfg.unwrap().noise.is_some());
    }
}

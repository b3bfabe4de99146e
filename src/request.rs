//! Form fields for a PSG API call.

use crate::{Config, Settings};
use serde::{Deserialize, Serialize};

/// What PSG should return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// The configuration PSG ran.
    Cfg,
    /// The radiance spectrum.
    Rad,
    /// Every output, as a multi-part reply.
    All,
    /// The named outputs, as a multi-part reply.
    List(Vec<String>),
}

impl OutputType {
    /// True if the reply is a single file rather than `results_*` blocks.
    pub fn is_single_file(&self) -> bool {
        matches!(self, Self::Cfg | Self::Rad)
    }

    fn form_values(&self) -> Vec<String> {
        match self {
            Self::Cfg => vec!["cfg".to_string()],
            Self::Rad => vec!["rad".to_string()],
            Self::All => vec!["all".to_string()],
            Self::List(names) => names.clone(),
        }
    }
}

/// A request to the PSG API. Sending it is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    file: String,
    output: Option<OutputType>,
    app: Option<String>,
}

impl ApiRequest {
    pub fn new(config: &Config) -> Self {
        Self::from_text(config.content())
    }

    /// A request for configuration text that was built elsewhere.
    pub fn from_text(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            output: None,
            app: None,
        }
    }

    pub fn with_output(mut self, output: OutputType) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// True if the reply is a single file. PSG's default output is.
    pub fn is_single_file(&self) -> bool {
        self.output.as_ref().map_or(true, OutputType::is_single_file)
    }

    /// The `(name, value)` form fields to post to `settings.url`.
    ///
    /// A list output repeats the `type` field once per name.
    pub fn form(&self, settings: &Settings) -> Vec<(&'static str, String)> {
        let mut form = vec![("file", self.file.clone())];
        if let Some(output) = &self.output {
            form.extend(output.form_values().into_iter().map(|v| ("type", v)));
        }
        if let Some(app) = &self.app {
            form.push(("app", app.clone()));
        }
        if let Some(key) = &settings.api_key {
            form.push(("key", key.clone()));
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_form() {
        let request = ApiRequest::from_text("<OBJECT>Planet");
        assert!(request.is_single_file());
        assert_eq!(
            request.form(&Settings::default()),
            vec![("file", "<OBJECT>Planet".to_string())]
        );
    }

    #[test]
    fn test_full_form() {
        let settings = Settings {
            api_key: Some("k".to_string()),
            ..Settings::default()
        };
        let request = ApiRequest::from_text("<OBJECT>Planet")
            .with_output(OutputType::List(vec!["rad".into(), "noi".into()]))
            .with_app("globes");
        assert!(!request.is_single_file());
        assert_eq!(
            request.form(&settings),
            vec![
                ("file", "<OBJECT>Planet".to_string()),
                ("type", "rad".to_string()),
                ("type", "noi".to_string()),
                ("app", "globes".to_string()),
                ("key", "k".to_string()),
            ]
        );
    }

    #[test]
    fn test_output_kinds() {
        assert!(OutputType::Cfg.is_single_file());
        assert!(OutputType::Rad.is_single_file());
        assert!(!OutputType::All.is_single_file());
    }
}

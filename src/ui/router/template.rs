use thiserror::Error;

const TITLE: &str = "{title}";
const CONTENT: &str = "{content}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Screen template is missing the {placeholder} placeholder")]
    MissingPlaceholder { placeholder: &'static str },
}

/// Layout every screen is cloned from.
///
/// Holds `{title}` and `{content}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenTemplate {
    raw: String,
}

impl ScreenTemplate {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        for placeholder in [TITLE, CONTENT] {
            if !raw.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder { placeholder });
            }
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn render(&self, title: &str, content: &str) -> String {
        self.raw.replace(TITLE, title).replace(CONTENT, content)
    }
}

/// Upper bound of [`RenderConfig::indent`].
pub const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Number of spaces per indentation level, at most [`MAX_INDENT`].
    /// 2 by default.
    #[serde(deserialize_with = "deserialize_indent")]
    pub indent: usize,
    /// If descriptions should be rendered as block strings.
    pub descriptions: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            descriptions: true,
        }
    }
}

impl RenderConfig {
    pub fn from_toml(source: &str) -> crate::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub(crate) fn indentation(&self) -> String {
        " ".repeat(self.indent.min(MAX_INDENT))
    }
}

fn deserialize_indent<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let indent = <usize as serde::Deserialize>::deserialize(deserializer)?;

    if indent > MAX_INDENT {
        return Err(serde::de::Error::custom(format!(
            "indent must be at most {MAX_INDENT}, got {indent}"
        )));
    }

    Ok(indent)
}

use serde::Serialize;

/// A finished component: its name and formatted Svelte source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub name: String,
    pub content: String,
}

impl Fragment {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// The result of converting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// The fully reduced top-level component.
    pub root: Fragment,
    /// Extracted components in emission order (descendants before ancestors).
    pub fragments: Vec<Fragment>,
}

impl Conversion {
    /// Look up an extracted fragment by component name.
    #[must_use]
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.name == name)
    }

    /// Names of all extracted fragments in emission order.
    #[must_use]
    pub fn fragment_names(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.name.as_str()).collect()
    }
}

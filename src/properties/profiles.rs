use std::fmt;

/// Extensions tried for every candidate name, in load order.
pub const EXTENSIONS: [&str; 3] = ["properties", "yml", "yaml"];

/// Ordered, de-duplicated list of active profile names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveProfiles(Vec<String>);

impl ActiveProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated list such as `"dev, local"`.
    pub fn from_list(list: &str) -> Self {
        let mut profiles = Self::new();
        for name in list.split(',') {
            profiles.push(name);
        }
        profiles
    }

    /// Reads the list from environment variable `var`; unset means none.
    pub fn from_env(var: &str) -> Self {
        std::env::var(var)
            .map(|list| Self::from_list(&list))
            .unwrap_or_default()
    }

    /// Appends `name` unless it is blank or already active.
    pub fn push(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && !self.0.iter().any(|p| p == name) {
            self.0.push(name.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Candidate file names for `base_name`, in merge order.
    ///
    /// `application.properties, application.yml, application.yaml,
    /// application-dev.properties, ...`
    pub fn candidates(&self, base_name: &str) -> Vec<String> {
        let stems = std::iter::once(base_name.to_string())
            .chain(self.iter().map(|p| format!("{}-{}", base_name, p)));

        stems
            .flat_map(|stem| EXTENSIONS.iter().map(move |ext| format!("{}.{}", stem, ext)))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ActiveProfiles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut profiles = Self::new();
        for name in iter {
            profiles.push(name.as_ref());
        }
        profiles
    }
}

impl fmt::Display for ActiveProfiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// License text with the year already filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    text: String,
}

impl License {
    /// Fill `{{YEAR}}` in a raw license template.
    pub fn from_template(raw: &str, year: i32) -> Self {
        Self {
            text: raw.replace("{{YEAR}}", &year.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// License text as it should appear in `bundle`.
    ///
    /// When the policy applies to the bundle, every line mentioning the
    /// excluded attribution is dropped.
    pub fn for_bundle(&self, bundle: &str, policy: &LicensePolicy) -> String {
        match policy.marker_for(bundle) {
            Some(marker) => self
                .text
                .split('\n')
                .filter(|line| !line.contains(marker))
                .collect::<Vec<_>>()
                .join("\n"),
            None => self.text.clone(),
        }
    }
}

/// Which bundles drop which third-party attribution line.
///
/// The default policy never filters anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicensePolicy {
    exclude_marker: Option<String>,
    exclude_for: Vec<String>,
}

impl LicensePolicy {
    pub fn new<I, S>(exclude_marker: impl Into<String>, exclude_for: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let marker = exclude_marker.into();
        Self {
            exclude_marker: (!marker.is_empty()).then_some(marker),
            exclude_for: exclude_for.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exclude_marker(&self) -> Option<&str> {
        self.exclude_marker.as_deref()
    }

    pub fn exclude_for(&self) -> &[String] {
        &self.exclude_for
    }

    /// `true` if lines should be filtered for this bundle name.
    pub fn applies_to(&self, bundle: &str) -> bool {
        self.marker_for(bundle).is_some()
    }

    fn marker_for(&self, bundle: &str) -> Option<&str> {
        let marker = self.exclude_marker.as_deref()?;
        self.exclude_for
            .iter()
            .any(|kind| bundle.contains(kind.as_str()))
            .then_some(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "Copyright (c) {{YEAR}} Samizdat Drafting Co.\n\
                       Physics code derived from springy.js, copyright (c) 2010 Dennis Hotson\n\
                       Permission is hereby granted...";

    fn policy() -> LicensePolicy {
        LicensePolicy::new("springy.js", ["graphics", "tween"])
    }

    #[test]
    fn year_is_substituted() {
        let lic = License::from_template(RAW, 2031);
        assert!(lic.text().starts_with("Copyright (c) 2031 "));
        assert!(!lic.text().contains("{{YEAR}}"));
    }

    #[test]
    fn graphics_bundle_drops_attribution() {
        let lic = License::from_template(RAW, 2024);
        let out = lic.for_bundle("arbor-graphics.js", &policy());
        assert!(!out.contains("springy.js"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn tween_bundle_drops_attribution() {
        let lic = License::from_template(RAW, 2024);
        assert!(!lic.for_bundle("arbor-tween.js", &policy()).contains("springy.js"));
    }

    #[test]
    fn physics_bundle_keeps_attribution() {
        let lic = License::from_template(RAW, 2024);
        let out = lic.for_bundle("arbor.js", &policy());
        assert!(out.contains("springy.js"));
        assert_eq!(out, lic.text());
    }

    #[test]
    fn default_policy_never_filters() {
        let p = LicensePolicy::default();
        assert!(!p.applies_to("arbor-graphics.js"));
        let lic = License::from_template(RAW, 2024);
        assert_eq!(lic.for_bundle("arbor-graphics.js", &p), lic.text());
    }
}
